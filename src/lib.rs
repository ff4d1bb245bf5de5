//! # DriveHub Car Rental Service
//!
//! Backend for a car rental marketplace: vehicle fleet management,
//! availability calendars, price quoting and the reservation lifecycle.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, pricing rules and repository traits
//! - **application**: Use-case services (fleet, booking, identity)
//! - **infrastructure**: External concerns (database, crypto, in-memory storage)
//! - **interfaces**: REST API with Swagger documentation and WebSocket streams
//! - **notifications**: Real-time event bus for UI clients
//! - **shared**: Cross-cutting types (errors, pagination, time helpers)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
