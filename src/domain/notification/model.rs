//! Notification domain entity

use chrono::{DateTime, Utc};

/// What a notification is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    ReservationCreated,
    ReservationConfirmed,
    ReservationCancelled,
    ReservationCompleted,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReservationCreated => "reservation_created",
            Self::ReservationConfirmed => "reservation_confirmed",
            Self::ReservationCancelled => "reservation_cancelled",
            Self::ReservationCompleted => "reservation_completed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "reservation_created" => Self::ReservationCreated,
            "reservation_confirmed" => Self::ReservationConfirmed,
            "reservation_cancelled" => Self::ReservationCancelled,
            "reservation_completed" => Self::ReservationCompleted,
            _ => Self::ReservationCreated,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row in a user's notification feed
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            kind,
            title: title.into(),
            body: body.into(),
            read: false,
            created_at: Utc::now(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notification_is_unread() {
        let n = Notification::new(
            "n1",
            "cust-1",
            NotificationKind::ReservationCreated,
            "Reservation received",
            "We got your booking",
        );
        assert!(!n.read);
        assert_eq!(n.kind, NotificationKind::ReservationCreated);
    }

    #[test]
    fn kind_roundtrip() {
        for kind in &[
            NotificationKind::ReservationCreated,
            NotificationKind::ReservationConfirmed,
            NotificationKind::ReservationCancelled,
            NotificationKind::ReservationCompleted,
        ] {
            assert_eq!(&NotificationKind::from_str(kind.as_str()), kind);
        }
    }
}
