//! Reservation aggregate
//!
//! Contains the Reservation entity, its status machine with actor-gated
//! transitions, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Actor, Reservation, ReservationStatus};
pub use repository::{ReservationQuery, ReservationRepository};
