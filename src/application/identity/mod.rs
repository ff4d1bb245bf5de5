//! Identity module — accounts and authentication
//!
//! Home of the `UserService`: login, registration, admin user CRUD,
//! password changes and the startup admin seed.

pub mod service;

pub use service::{role_to_str, str_to_role, AuthResult, UserService};
