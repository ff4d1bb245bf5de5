//! Notifications module
//!
//! Provides real-time event notifications via WebSocket for UI clients.
//!
//! # Features
//! - Event bus for pub/sub messaging
//! - WebSocket endpoint for storefront and dashboard clients
//! - Filtering by user and event type
//!
//! # Usage
//! ```ignore
//! use drivehub::notifications::{create_event_bus, Event, ReservationStatusEvent};
//! use chrono::Utc;
//!
//! // Create event bus
//! let event_bus = create_event_bus();
//!
//! // Publish events
//! event_bus.publish(Event::ReservationConfirmed(ReservationStatusEvent {
//!     reservation_id: "res-1".to_string(),
//!     vehicle_id: "veh-1".to_string(),
//!     customer_id: "cust-1".to_string(),
//!     status: "confirmed".to_string(),
//!     timestamp: Utc::now(),
//! }));
//! ```
//!
//! # WebSocket Endpoint
//! Connect to `/api/v1/notifications/ws` with optional query parameters:
//! - `user_id` - Only receive events concerning this user
//! - `event_types` - Comma-separated list of event types to receive

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
