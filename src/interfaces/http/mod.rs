//! HTTP REST API interfaces
//!
//! - `common`: Response envelopes and validated JSON extraction
//! - `middleware`: JWT authentication and admin gating
//! - `modules`: Request handlers and DTOs, one module per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
