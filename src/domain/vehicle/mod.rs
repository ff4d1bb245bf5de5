//! Vehicle aggregate
//!
//! Contains the Vehicle entity, its availability periods and the two
//! availability predicates (calendar-day check and exact interval cover),
//! plus the repository interface.

pub mod availability;
pub mod model;
pub mod repository;

pub use availability::{covers_interval, group_by_day, has_availability, is_available_on, DayGroup};
pub use model::{AvailabilityPeriod, Vehicle};
pub use repository::{VehicleQuery, VehicleRepository};
