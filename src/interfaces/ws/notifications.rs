//! WebSocket handler for storefront and dashboard notification clients
//!
//! Streams reservation lifecycle events in real time. Clients subscribe
//! with optional query filters and receive one JSON frame per event.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::select;
use tracing::{debug, error, info, warn};

use crate::notifications::{EventMessage, SharedEventBus};

/// Query parameters for filtering events
#[derive(Debug, Deserialize)]
pub struct EventFilter {
    /// Only receive events concerning this user (optional)
    pub user_id: Option<String>,
    /// Filter by event types (comma-separated, optional)
    pub event_types: Option<String>,
}

impl EventFilter {
    /// Check if event matches the filter
    pub fn matches(&self, event: &EventMessage) -> bool {
        if let Some(ref user_id) = self.user_id {
            if let Some(event_user_id) = event.event.user_id() {
                if event_user_id != user_id {
                    return false;
                }
            } else {
                return false;
            }
        }

        if let Some(ref types) = self.event_types {
            let allowed_types: Vec<&str> = types.split(',').map(|s| s.trim()).collect();
            if !allowed_types.contains(&event.event.event_type()) {
                return false;
            }
        }

        true
    }
}

/// State for notification WebSocket handler
#[derive(Clone)]
pub struct NotificationState {
    pub event_bus: SharedEventBus,
}

/// WebSocket upgrade handler for notifications
pub async fn ws_notifications_handler(
    ws: WebSocketUpgrade,
    State(state): State<NotificationState>,
    Query(filter): Query<EventFilter>,
) -> impl IntoResponse {
    info!(
        "New notification WebSocket connection: user={:?}, event_types={:?}",
        filter.user_id, filter.event_types
    );

    ws.on_upgrade(move |socket| handle_notification_socket(socket, state, filter))
}

type WsSender = SplitSink<WebSocket, Message>;

/// Drive one client connection: greet, then interleave bus events with
/// client control frames until either side goes away.
async fn handle_notification_socket(
    socket: WebSocket,
    state: NotificationState,
    filter: EventFilter,
) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscriber = state.event_bus.subscribe();

    if let Err(e) = send_welcome(&mut sender, &filter).await {
        error!("Failed to send welcome frame: {}", e);
        return;
    }
    info!("Notification stream client ready");

    loop {
        select! {
            frame = receiver.next() => {
                if !process_client_frame(&mut sender, frame).await {
                    break;
                }
            }
            event = subscriber.recv() => {
                let Some(event_msg) = event else {
                    warn!("Event bus closed");
                    break;
                };
                if filter.matches(&event_msg) && !push_event(&mut sender, &event_msg).await {
                    break;
                }
            }
        }
    }

    info!("Notification stream client disconnected");
}

async fn send_welcome(sender: &mut WsSender, filter: &EventFilter) -> Result<(), axum::Error> {
    let welcome = serde_json::json!({
        "type": "connected",
        "message": "Connected to notification stream",
        "filter": {
            "user_id": filter.user_id,
            "event_types": filter.event_types
        }
    });
    sender.send(Message::Text(welcome.to_string().into())).await
}

/// Returns false once the connection should be torn down.
async fn process_client_frame(
    sender: &mut WsSender,
    frame: Option<Result<Message, axum::Error>>,
) -> bool {
    match frame {
        Some(Ok(Message::Text(text))) => {
            debug!("Ignoring client text frame: {}", text);
            true
        }
        Some(Ok(Message::Ping(data))) => {
            if let Err(e) = sender.send(Message::Pong(data)).await {
                error!("Failed to answer ping: {}", e);
                return false;
            }
            true
        }
        Some(Ok(Message::Pong(_))) => true,
        Some(Ok(Message::Close(_))) => {
            info!("Close frame from client");
            false
        }
        Some(Ok(_)) => true,
        Some(Err(e)) => {
            warn!("WebSocket error: {}", e);
            false
        }
        None => {
            info!("Client stream ended");
            false
        }
    }
}

/// Returns false once the socket is no longer writable. A value that fails
/// to serialize is logged and skipped without dropping the connection.
async fn push_event(sender: &mut WsSender, event_msg: &EventMessage) -> bool {
    let json = match serde_json::to_string(event_msg) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize event: {}", e);
            return true;
        }
    };

    if let Err(e) = sender.send(Message::Text(json.into())).await {
        error!("Failed to push event: {}", e);
        return false;
    }
    debug!("Pushed {} to client", event_msg.event.event_type());
    true
}

/// Create notification state
pub fn create_notification_state(event_bus: SharedEventBus) -> NotificationState {
    NotificationState { event_bus }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{Event, EventMessage, ReservationStatusEvent};
    use chrono::Utc;

    fn event_for(customer: &str, status: &str) -> EventMessage {
        let inner = ReservationStatusEvent {
            reservation_id: "res-1".to_string(),
            vehicle_id: "veh-1".to_string(),
            customer_id: customer.to_string(),
            status: status.to_string(),
            timestamp: Utc::now(),
        };
        let event = match status {
            "completed" => Event::ReservationCompleted(inner),
            _ => Event::ReservationConfirmed(inner),
        };
        EventMessage::new(event)
    }

    #[test]
    fn no_filter_matches_everything() {
        let filter = EventFilter {
            user_id: None,
            event_types: None,
        };
        assert!(filter.matches(&event_for("cust-1", "confirmed")));
    }

    #[test]
    fn user_filter_drops_other_users() {
        let filter = EventFilter {
            user_id: Some("cust-1".to_string()),
            event_types: None,
        };
        assert!(filter.matches(&event_for("cust-1", "confirmed")));
        assert!(!filter.matches(&event_for("cust-2", "confirmed")));
    }

    #[test]
    fn type_filter_is_comma_separated() {
        let filter = EventFilter {
            user_id: None,
            event_types: Some("reservation_confirmed, reservation_cancelled".to_string()),
        };
        assert!(filter.matches(&event_for("cust-1", "confirmed")));
        assert!(!filter.matches(&event_for("cust-1", "completed")));
    }
}
