//! Settings module — storefront-wide configuration

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
