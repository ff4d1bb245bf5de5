//! Notification events
//!
//! Defines all event types that can be broadcasted to WebSocket clients.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// Customer created a reservation
    ReservationCreated(ReservationCreatedEvent),
    /// Administrator confirmed a reservation
    ReservationConfirmed(ReservationStatusEvent),
    /// Reservation was cancelled by the owner or an administrator
    ReservationCancelled(ReservationCancelledEvent),
    /// Rental finished and the vehicle was returned
    ReservationCompleted(ReservationStatusEvent),
    /// A vehicle's availability periods were replaced
    AvailabilityChanged(AvailabilityChangedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ReservationCreated(_) => "reservation_created",
            Event::ReservationConfirmed(_) => "reservation_confirmed",
            Event::ReservationCancelled(_) => "reservation_cancelled",
            Event::ReservationCompleted(_) => "reservation_completed",
            Event::AvailabilityChanged(_) => "availability_changed",
        }
    }

    /// The customer this event concerns, for per-user WebSocket filtering.
    /// Fleet-wide events carry no user.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Event::ReservationCreated(e) => Some(&e.customer_id),
            Event::ReservationConfirmed(e) => Some(&e.customer_id),
            Event::ReservationCancelled(e) => Some(&e.customer_id),
            Event::ReservationCompleted(e) => Some(&e.customer_id),
            Event::AvailabilityChanged(_) => None,
        }
    }
}

/// Reservation created event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreatedEvent {
    pub reservation_id: String,
    pub vehicle_id: String,
    pub customer_id: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub total_price: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Generic status-change event (confirmed, completed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusEvent {
    pub reservation_id: String,
    pub vehicle_id: String,
    pub customer_id: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Cancellation carries who asked for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCancelledEvent {
    pub reservation_id: String,
    pub vehicle_id: String,
    pub customer_id: String,
    /// "admin" or "customer"
    pub cancelled_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Availability replacement event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityChangedEvent {
    pub vehicle_id: String,
    pub period_count: usize,
    pub is_available: bool,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn created_event() -> Event {
        Event::ReservationCreated(ReservationCreatedEvent {
            reservation_id: "res-1".into(),
            vehicle_id: "veh-1".into(),
            customer_id: "cust-1".into(),
            start_date_time: Utc::now(),
            end_date_time: Utc::now(),
            total_price: Decimal::from(300),
            timestamp: Utc::now(),
        })
    }

    #[test]
    fn event_type_names() {
        assert_eq!(created_event().event_type(), "reservation_created");
        let e = Event::AvailabilityChanged(AvailabilityChangedEvent {
            vehicle_id: "veh-1".into(),
            period_count: 0,
            is_available: false,
            timestamp: Utc::now(),
        });
        assert_eq!(e.event_type(), "availability_changed");
    }

    #[test]
    fn user_id_extraction() {
        assert_eq!(created_event().user_id(), Some("cust-1"));
        let e = Event::AvailabilityChanged(AvailabilityChangedEvent {
            vehicle_id: "veh-1".into(),
            period_count: 2,
            is_available: true,
            timestamp: Utc::now(),
        });
        assert_eq!(e.user_id(), None);
    }

    #[test]
    fn serializes_with_type_tag() {
        let msg = EventMessage::new(created_event());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "ReservationCreated");
        assert_eq!(json["data"]["reservation_id"], "res-1");
        assert!(json["id"].is_string());
    }
}
