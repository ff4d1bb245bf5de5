//! Notification module — per-user feed and read tracking

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
