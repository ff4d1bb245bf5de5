//! Reservation domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

/// Reservation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Created by a customer, awaiting administrator confirmation
    Pending,
    /// Confirmed by an administrator
    Confirmed,
    /// Rental happened and the vehicle was returned
    Completed,
    /// Cancelled before the rental happened
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Cancelled,
        }
    }

    /// Terminal states admit no further transitions, not even re-cancelling.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who is asking for a status change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Admin,
    /// A customer, identified by user id
    Customer(String),
}

/// Booking of a vehicle by a customer
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: String,
    pub vehicle_id: String,
    pub customer_id: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub pickup_location: String,
    pub return_location: String,
    pub with_driver: bool,
    /// Ids into the option catalog as selected at booking time; entries may
    /// outlive the catalog rows they point to
    pub selected_option_ids: Vec<String>,
    /// Priced once at creation and never recomputed
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        customer_id: impl Into<String>,
        start_date_time: DateTime<Utc>,
        end_date_time: DateTime<Utc>,
        pickup_location: impl Into<String>,
        return_location: impl Into<String>,
        with_driver: bool,
        selected_option_ids: Vec<String>,
        total_price: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            customer_id: customer_id.into(),
            start_date_time,
            end_date_time,
            pickup_location: pickup_location.into(),
            return_location: return_location.into(),
            with_driver,
            selected_option_ids,
            total_price,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.customer_id == user_id
    }

    /// Confirm a pending reservation. Administrators only.
    pub fn confirm(&mut self, actor: &Actor) -> DomainResult<()> {
        self.ensure_can_move_to(ReservationStatus::Confirmed)?;
        ensure_admin(actor, "confirm")?;
        self.set_status(ReservationStatus::Confirmed);
        Ok(())
    }

    /// Complete a confirmed reservation. Administrators only.
    pub fn complete(&mut self, actor: &Actor) -> DomainResult<()> {
        self.ensure_can_move_to(ReservationStatus::Completed)?;
        ensure_admin(actor, "complete")?;
        self.set_status(ReservationStatus::Completed);
        Ok(())
    }

    /// Cancel a pending or confirmed reservation. Administrators or the
    /// owning customer.
    pub fn cancel(&mut self, actor: &Actor) -> DomainResult<()> {
        self.ensure_can_move_to(ReservationStatus::Cancelled)?;
        match actor {
            Actor::Admin => {}
            Actor::Customer(user_id) if self.is_owned_by(user_id) => {}
            Actor::Customer(_) => {
                return Err(DomainError::Forbidden(
                    "Only the owning customer may cancel this reservation".into(),
                ));
            }
        }
        self.set_status(ReservationStatus::Cancelled);
        Ok(())
    }

    /// State-machine legality. Checked before actor permission so terminal
    /// states answer the same way to everyone.
    fn ensure_can_move_to(&self, to: ReservationStatus) -> DomainResult<()> {
        use ReservationStatus::*;
        let legal = matches!(
            (&self.status, &to),
            (Pending, Confirmed) | (Confirmed, Completed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        );
        if legal {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.status.as_str(),
                to: to.as_str(),
            })
        }
    }

    fn set_status(&mut self, status: ReservationStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

fn ensure_admin(actor: &Actor, action: &str) -> DomainResult<()> {
    match actor {
        Actor::Admin => Ok(()),
        Actor::Customer(_) => Err(DomainError::Forbidden(format!(
            "Only administrators may {action} reservations"
        ))),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_reservation() -> Reservation {
        let start = Utc::now() + Duration::days(3);
        Reservation::new(
            "res-1",
            "veh-1",
            "cust-1",
            start,
            start + Duration::days(2),
            "Airport",
            "Airport",
            false,
            vec![],
            Decimal::from(225),
        )
    }

    fn owner() -> Actor {
        Actor::Customer("cust-1".into())
    }

    fn stranger() -> Actor {
        Actor::Customer("cust-2".into())
    }

    #[test]
    fn new_reservation_is_pending() {
        let r = sample_reservation();
        assert_eq!(r.status, ReservationStatus::Pending);
        assert!(!r.status.is_terminal());
        assert!(r.is_owned_by("cust-1"));
        assert!(!r.is_owned_by("cust-2"));
    }

    #[test]
    fn admin_confirms_pending() {
        let mut r = sample_reservation();
        r.confirm(&Actor::Admin).unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn customer_cannot_confirm_even_own() {
        let mut r = sample_reservation();
        let err = r.confirm(&owner()).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(r.status, ReservationStatus::Pending);
    }

    #[test]
    fn admin_completes_confirmed() {
        let mut r = sample_reservation();
        r.confirm(&Actor::Admin).unwrap();
        r.complete(&Actor::Admin).unwrap();
        assert_eq!(r.status, ReservationStatus::Completed);
    }

    #[test]
    fn complete_requires_prior_confirmation() {
        let mut r = sample_reservation();
        let err = r.complete(&Actor::Admin).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: "pending",
                to: "completed"
            }
        ));
    }

    #[test]
    fn owner_cancels_pending() {
        let mut r = sample_reservation();
        r.cancel(&owner()).unwrap();
        assert_eq!(r.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn owner_cancels_confirmed() {
        let mut r = sample_reservation();
        r.confirm(&Actor::Admin).unwrap();
        r.cancel(&owner()).unwrap();
        assert_eq!(r.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn admin_cancels_any() {
        let mut r = sample_reservation();
        r.cancel(&Actor::Admin).unwrap();
        assert_eq!(r.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn stranger_cannot_cancel() {
        let mut r = sample_reservation();
        let err = r.cancel(&stranger()).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(r.status, ReservationStatus::Pending);
    }

    #[test]
    fn cancelled_is_terminal_even_for_cancel() {
        let mut r = sample_reservation();
        r.cancel(&Actor::Admin).unwrap();
        let err = r.cancel(&Actor::Admin).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn completed_is_terminal() {
        let mut r = sample_reservation();
        r.confirm(&Actor::Admin).unwrap();
        r.complete(&Actor::Admin).unwrap();
        assert!(r.confirm(&Actor::Admin).is_err());
        assert!(r.cancel(&Actor::Admin).is_err());
        assert!(r.complete(&Actor::Admin).is_err());
        assert_eq!(r.status, ReservationStatus::Completed);
    }

    #[test]
    fn terminal_state_reported_before_permission() {
        // even an unauthorized caller sees the transition error on a
        // terminal reservation, so responses do not depend on the caller
        let mut r = sample_reservation();
        r.cancel(&Actor::Admin).unwrap();
        let err = r.confirm(&stranger()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn transitions_never_touch_total_price() {
        let mut r = sample_reservation();
        let priced = r.total_price;
        r.confirm(&Actor::Admin).unwrap();
        assert_eq!(r.total_price, priced);
        r.complete(&Actor::Admin).unwrap();
        assert_eq!(r.total_price, priced);
    }

    #[test]
    fn status_display_roundtrip() {
        for status in &[
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            let s = status.as_str();
            let parsed = ReservationStatus::from_str(s);
            assert_eq!(&parsed, status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_cancelled() {
        let s = ReservationStatus::from_str("garbage");
        assert_eq!(s, ReservationStatus::Cancelled);
    }
}
