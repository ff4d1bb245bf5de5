//! Reservation module — booking creation, lifecycle and listings

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
