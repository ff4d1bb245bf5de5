//! Vehicle module — fleet CRUD, availability periods, price quotes

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
