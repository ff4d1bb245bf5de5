//! In-process event bus
//!
//! A thin wrapper over a tokio broadcast channel. Services publish domain
//! events fire-and-forget; interested parties call `subscribe()` and get
//! an `EventSubscriber` whose `Drop` impl unregisters it, so the live
//! subscriber count always reflects connected consumers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::broadcast;

use super::events::{Event, EventMessage};

/// Default channel capacity
const DEFAULT_CAPACITY: usize = 1024;

/// Broadcasts every published event to all current subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventBus {
    /// Create a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new event bus with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wrap the event in an envelope and fan it out. Publishing with no
    /// subscribers is not an error; the event is simply dropped.
    pub fn publish(&self, event: Event) {
        let message = EventMessage::new(event);
        let event_type = message.event.event_type();
        let user_id = message.event.user_id().map(String::from);

        if let Ok(delivered) = self.sender.send(message) {
            debug!(
                "Broadcast {} (user={:?}) to {} subscriber(s)",
                event_type, user_id, delivered
            );
        } else {
            debug!(
                "Dropped {} (user={:?}): no subscribers",
                event_type, user_id
            );
        }
    }

    /// Register a new subscriber. Events published before this call are
    /// not replayed.
    pub fn subscribe(&self) -> EventSubscriber {
        let receiver = self.sender.subscribe();
        let count = self.subscriber_count.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Event subscriber attached ({} active)", count);

        EventSubscriber {
            receiver,
            subscriber_count: self.subscriber_count.clone(),
        }
    }

    /// Number of currently attached subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of the bus. Dropping it unsubscribes.
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventSubscriber {
    /// Next event, or `None` once the bus itself is gone. A slow consumer
    /// that falls behind the channel capacity skips the missed events and
    /// keeps going.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(msg) => return Some(msg),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("Event subscriber lagged; skipped {} event(s)", missed);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for EventSubscriber {
    fn drop(&mut self) {
        let remaining = self.subscriber_count.fetch_sub(1, Ordering::SeqCst) - 1;
        info!("Event subscriber detached ({} active)", remaining);
    }
}

/// Shared event bus type
pub type SharedEventBus = Arc<EventBus>;

/// Create a shared event bus
pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::events::ReservationStatusEvent;
    use chrono::Utc;

    fn confirmed_event(customer: &str) -> Event {
        Event::ReservationConfirmed(ReservationStatusEvent {
            reservation_id: "res-1".to_string(),
            vehicle_id: "veh-1".to_string(),
            customer_id: customer.to_string(),
            status: "confirmed".to_string(),
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut subscriber = bus.subscribe();

        bus.publish(confirmed_event("cust-1"));

        let received = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            subscriber.recv(),
        )
        .await
        .expect("Timeout")
        .expect("No message");

        assert_eq!(received.event.event_type(), "reservation_confirmed");
        assert_eq!(received.event.user_id(), Some("cust-1"));
    }

    #[test]
    fn subscriber_count_tracks_drops() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);

        let sub1 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        let _sub2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(sub1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn all_subscribers_receive_the_event() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(confirmed_event("cust-9"));

        for sub in [&mut a, &mut b] {
            let msg = tokio::time::timeout(std::time::Duration::from_millis(100), sub.recv())
                .await
                .expect("Timeout")
                .expect("No message");
            assert_eq!(msg.event.user_id(), Some("cust-9"));
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(confirmed_event("cust-2"));

        // A late subscriber must not see the earlier event.
        let mut late = bus.subscribe();
        bus.publish(confirmed_event("cust-3"));
        let msg = tokio::time::timeout(std::time::Duration::from_millis(100), late.recv())
            .await
            .expect("Timeout")
            .expect("No message");
        assert_eq!(msg.event.user_id(), Some("cust-3"));
    }
}
