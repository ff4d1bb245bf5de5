//! Booking module — reservation quoting and lifecycle
//!
//! Contains the `BookingService` which orchestrates quoting, reservation
//! creation, and the pending → confirmed → completed state machine.

pub mod service;

pub use service::{BookingService, CreateReservationRequest};
