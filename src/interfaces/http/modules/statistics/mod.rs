//! Statistics module — admin dashboard aggregates

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
