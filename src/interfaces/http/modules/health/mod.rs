//! Health module — liveness and dependency checks

pub mod handlers;

pub use handlers::*;
