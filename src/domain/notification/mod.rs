//! Notification aggregate
//!
//! Persistent per-user notification records appended by booking operations.
//! Live delivery happens separately over the event bus; these rows are what
//! the bell icon reads after the fact.

pub mod model;
pub mod repository;

pub use model::{Notification, NotificationKind};
pub use repository::{NotificationQuery, NotificationRepository};
