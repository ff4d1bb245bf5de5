//! Fleet module — vehicles, availability periods and the option catalog
//!
//! Contains the `FleetService` used by administrators to manage the
//! rentable inventory and its availability windows.

pub mod service;

pub use service::{FleetService, PeriodPayload, VehiclePayload};
