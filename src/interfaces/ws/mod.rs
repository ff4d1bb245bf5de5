//! WebSocket interfaces
//!
//! - `notifications`: Real-time reservation event streaming to UI clients

pub mod notifications;

pub use notifications::{create_notification_state, ws_notifications_handler, NotificationState};
