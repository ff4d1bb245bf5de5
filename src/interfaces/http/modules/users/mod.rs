//! Users module — admin-side account management

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
