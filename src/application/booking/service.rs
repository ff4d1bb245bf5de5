//! Booking service — reservation lifecycle orchestration
//!
//! All reservation business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::pricing::{calculate_breakdown, PriceBreakdown};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::{
    Actor, Reservation, ReservationQuery, ReservationStatus,
};
use crate::domain::vehicle::{covers_interval, Vehicle};
use crate::domain::{DomainError, DomainResult};
use crate::notifications::event_bus::SharedEventBus;
use crate::notifications::events::{
    Event, ReservationCancelledEvent, ReservationCreatedEvent, ReservationStatusEvent,
};
use crate::shared::PaginatedResult;

/// Payload for creating a reservation
#[derive(Debug, Clone)]
pub struct CreateReservationRequest {
    pub vehicle_id: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub pickup_location: String,
    /// Defaults to the pickup location when absent
    pub return_location: Option<String>,
    pub with_driver: bool,
    pub selected_option_ids: Vec<String>,
}

/// Booking service — orchestrates quoting, creation and status changes.
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    // ── Quoting ─────────────────────────────────────────────────

    /// Price a prospective rental without persisting anything.
    pub async fn quote(
        &self,
        vehicle_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        with_driver: bool,
        selected_option_ids: &[String],
    ) -> DomainResult<PriceBreakdown> {
        let vehicle = self.vehicle_or_not_found(vehicle_id).await?;
        let catalog = self.repos.rental_options().find_all().await?;

        Ok(calculate_breakdown(
            Some(vehicle.price_per_day),
            Some(start),
            Some(end),
            with_driver,
            selected_option_ids,
            &catalog,
        ))
    }

    // ── Creation ────────────────────────────────────────────────

    /// Create a reservation for `customer_id`.
    ///
    /// The total is priced here, once, against the current catalog; it is
    /// stored on the reservation and never recomputed afterwards.
    pub async fn create_reservation(
        &self,
        customer_id: &str,
        request: CreateReservationRequest,
    ) -> DomainResult<Reservation> {
        if request.end_date_time < request.start_date_time {
            return Err(DomainError::Validation(
                "End date must not be before start date".into(),
            ));
        }
        if request.pickup_location.trim().is_empty() {
            return Err(DomainError::Validation(
                "Pickup location must not be blank".into(),
            ));
        }

        let vehicle = self.vehicle_or_not_found(&request.vehicle_id).await?;

        // A single availability period must cover the whole interval.
        // Overlap with existing reservations is NOT checked.
        let periods = self.repos.vehicles().periods_for(&vehicle.id).await?;
        if !covers_interval(request.start_date_time, request.end_date_time, &periods) {
            return Err(DomainError::Conflict(format!(
                "Vehicle {} is not available for the requested dates",
                vehicle.id
            )));
        }

        let catalog = self.repos.rental_options().find_all().await?;
        let breakdown = calculate_breakdown(
            Some(vehicle.price_per_day),
            Some(request.start_date_time),
            Some(request.end_date_time),
            request.with_driver,
            &request.selected_option_ids,
            &catalog,
        );

        let return_location = match request.return_location {
            Some(loc) if !loc.trim().is_empty() => loc,
            _ => request.pickup_location.clone(),
        };

        let reservation = Reservation::new(
            Uuid::new_v4().to_string(),
            vehicle.id.clone(),
            customer_id,
            request.start_date_time,
            request.end_date_time,
            request.pickup_location,
            return_location,
            request.with_driver,
            request.selected_option_ids,
            breakdown.total,
        );

        self.repos.reservations().save(reservation.clone()).await?;

        metrics::counter!("reservations_total", "action" => "created").increment(1);
        info!(
            reservation_id = %reservation.id,
            vehicle_id = %reservation.vehicle_id,
            days = breakdown.days,
            "Reservation created"
        );

        self.notify(
            &reservation,
            NotificationKind::ReservationCreated,
            "Reservation received",
            format!(
                "Your reservation for {} from {} to {} is awaiting confirmation",
                vehicle.display_name(),
                reservation.start_date_time.format("%Y-%m-%d"),
                reservation.end_date_time.format("%Y-%m-%d"),
            ),
        )
        .await;

        self.event_bus
            .publish(Event::ReservationCreated(ReservationCreatedEvent {
                reservation_id: reservation.id.clone(),
                vehicle_id: reservation.vehicle_id.clone(),
                customer_id: reservation.customer_id.clone(),
                start_date_time: reservation.start_date_time,
                end_date_time: reservation.end_date_time,
                total_price: reservation.total_price,
                timestamp: Utc::now(),
            }));

        Ok(reservation)
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Confirm a pending reservation. Administrators only.
    pub async fn confirm(&self, id: &str, actor: &Actor) -> DomainResult<Reservation> {
        let mut reservation = self.reservation_or_not_found(id).await?;
        reservation.confirm(actor)?;

        self.repos
            .reservations()
            .update_status(id, ReservationStatus::Confirmed)
            .await?;

        metrics::counter!("reservations_total", "action" => "confirmed").increment(1);
        info!(reservation_id = %id, "Reservation confirmed");

        self.notify(
            &reservation,
            NotificationKind::ReservationConfirmed,
            "Reservation confirmed",
            format!(
                "Your reservation from {} to {} is confirmed",
                reservation.start_date_time.format("%Y-%m-%d"),
                reservation.end_date_time.format("%Y-%m-%d"),
            ),
        )
        .await;

        self.event_bus
            .publish(Event::ReservationConfirmed(self.status_event(&reservation)));

        Ok(reservation)
    }

    /// Complete a confirmed reservation. Administrators only.
    pub async fn complete(&self, id: &str, actor: &Actor) -> DomainResult<Reservation> {
        let mut reservation = self.reservation_or_not_found(id).await?;
        reservation.complete(actor)?;

        self.repos
            .reservations()
            .update_status(id, ReservationStatus::Completed)
            .await?;

        metrics::counter!("reservations_total", "action" => "completed").increment(1);
        info!(reservation_id = %id, "Reservation completed");

        self.notify(
            &reservation,
            NotificationKind::ReservationCompleted,
            "Reservation completed",
            "Your rental is complete. Thank you for driving with us".to_string(),
        )
        .await;

        self.event_bus
            .publish(Event::ReservationCompleted(self.status_event(&reservation)));

        Ok(reservation)
    }

    /// Cancel a pending or confirmed reservation. Administrators or the
    /// owning customer.
    pub async fn cancel(&self, id: &str, actor: &Actor) -> DomainResult<Reservation> {
        let mut reservation = self.reservation_or_not_found(id).await?;
        reservation.cancel(actor)?;

        self.repos
            .reservations()
            .update_status(id, ReservationStatus::Cancelled)
            .await?;

        let cancelled_by = match actor {
            Actor::Admin => "admin",
            Actor::Customer(_) => "customer",
        };

        metrics::counter!("reservations_total", "action" => "cancelled").increment(1);
        info!(reservation_id = %id, cancelled_by, "Reservation cancelled");

        self.notify(
            &reservation,
            NotificationKind::ReservationCancelled,
            "Reservation cancelled",
            format!(
                "Your reservation from {} to {} was cancelled",
                reservation.start_date_time.format("%Y-%m-%d"),
                reservation.end_date_time.format("%Y-%m-%d"),
            ),
        )
        .await;

        self.event_bus
            .publish(Event::ReservationCancelled(ReservationCancelledEvent {
                reservation_id: reservation.id.clone(),
                vehicle_id: reservation.vehicle_id.clone(),
                customer_id: reservation.customer_id.clone(),
                cancelled_by: cancelled_by.to_string(),
                timestamp: Utc::now(),
            }));

        Ok(reservation)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Fetch one reservation. Customers see only their own.
    pub async fn get_reservation(&self, id: &str, actor: &Actor) -> DomainResult<Reservation> {
        let reservation = self.reservation_or_not_found(id).await?;
        match actor {
            Actor::Admin => Ok(reservation),
            Actor::Customer(user_id) if reservation.is_owned_by(user_id) => Ok(reservation),
            Actor::Customer(_) => Err(DomainError::Forbidden(
                "Reservations are visible to their owner and administrators only".into(),
            )),
        }
    }

    /// Admin listing across all customers.
    pub async fn list_reservations(
        &self,
        query: &ReservationQuery,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        self.repos.reservations().search(query).await
    }

    /// A customer's own reservations.
    pub async fn list_own(
        &self,
        customer_id: &str,
        status: Option<ReservationStatus>,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        let query = ReservationQuery {
            status,
            vehicle_id: None,
            customer_id: Some(customer_id.to_string()),
            page,
            limit,
        };
        self.repos.reservations().search(&query).await
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn status_event(&self, reservation: &Reservation) -> ReservationStatusEvent {
        ReservationStatusEvent {
            reservation_id: reservation.id.clone(),
            vehicle_id: reservation.vehicle_id.clone(),
            customer_id: reservation.customer_id.clone(),
            status: reservation.status.as_str().to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Append a feed row for the owning customer. Failures are logged and
    /// swallowed; the state change itself already happened.
    async fn notify(
        &self,
        reservation: &Reservation,
        kind: NotificationKind,
        title: &str,
        body: String,
    ) {
        let notification = Notification::new(
            Uuid::new_v4().to_string(),
            reservation.customer_id.clone(),
            kind,
            title,
            body,
        );
        if let Err(e) = self.repos.notifications().save(notification).await {
            warn!(reservation_id = %reservation.id, "Failed to record notification: {}", e);
        }
    }

    async fn vehicle_or_not_found(&self, id: &str) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            })
    }

    async fn reservation_or_not_found(&self, id: &str) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use crate::domain::rental_option::RentalOption;
    use crate::domain::vehicle::AvailabilityPeriod;
    use crate::infrastructure::storage::InMemoryRepositories;
    use crate::notifications::event_bus::create_event_bus;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, d, h, 0, 0).unwrap()
    }

    async fn setup() -> (Arc<InMemoryRepositories>, BookingService) {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = BookingService::new(repos.clone(), create_event_bus());

        let vehicle = Vehicle::new("veh-1", "Toyota", "Camry", 2022, Decimal::from(100));
        repos.vehicles().save(vehicle).await.unwrap();
        repos
            .vehicles()
            .replace_periods(
                "veh-1",
                vec![AvailabilityPeriod::new("p1", "veh-1", at(1, 0), at(31, 0))],
            )
            .await
            .unwrap();

        let gps = RentalOption::new("opt-gps", "GPS", None, Decimal::from(25));
        repos.rental_options().save(gps).await.unwrap();

        (repos, service)
    }

    fn request(start: DateTime<Utc>, end: DateTime<Utc>) -> CreateReservationRequest {
        CreateReservationRequest {
            vehicle_id: "veh-1".into(),
            start_date_time: start,
            end_date_time: end,
            pickup_location: "Airport".into(),
            return_location: None,
            with_driver: false,
            selected_option_ids: vec![],
        }
    }

    #[tokio::test]
    async fn creates_priced_pending_reservation() {
        let (_, service) = setup().await;

        // 10th → 12th is 3 rental days
        let mut req = request(at(10, 9), at(12, 9));
        req.with_driver = true;
        req.selected_option_ids = vec!["opt-gps".into()];

        let r = service.create_reservation("cust-1", req).await.unwrap();
        assert_eq!(r.status, ReservationStatus::Pending);
        // 100*3 + 80*3 + 25*3
        assert_eq!(r.total_price, Decimal::from(615));
        assert_eq!(r.return_location, "Airport");
    }

    #[tokio::test]
    async fn rejects_end_before_start() {
        let (_, service) = setup().await;
        let err = service
            .create_reservation("cust-1", request(at(12, 9), at(10, 9)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_blank_pickup_location() {
        let (_, service) = setup().await;
        let mut req = request(at(10, 9), at(12, 9));
        req.pickup_location = "   ".into();
        let err = service.create_reservation("cust-1", req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_unknown_vehicle() {
        let (_, service) = setup().await;
        let mut req = request(at(10, 9), at(12, 9));
        req.vehicle_id = "veh-404".into();
        let err = service.create_reservation("cust-1", req).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn rejects_interval_outside_availability() {
        let (repos, service) = setup().await;
        // two adjacent periods, neither alone covers the request
        repos
            .vehicles()
            .replace_periods(
                "veh-1",
                vec![
                    AvailabilityPeriod::new("p1", "veh-1", at(1, 0), at(10, 0)),
                    AvailabilityPeriod::new("p2", "veh-1", at(10, 0), at(20, 0)),
                ],
            )
            .await
            .unwrap();

        let err = service
            .create_reservation("cust-1", request(at(8, 0), at(12, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn overlapping_reservations_are_not_prevented() {
        let (_, service) = setup().await;
        let first = service
            .create_reservation("cust-1", request(at(10, 9), at(12, 9)))
            .await
            .unwrap();
        let second = service
            .create_reservation("cust-2", request(at(10, 9), at(12, 9)))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn unknown_option_ids_are_skipped_in_pricing() {
        let (_, service) = setup().await;
        let mut req = request(at(10, 9), at(12, 9));
        req.selected_option_ids = vec!["opt-gps".into(), "opt-gone".into()];
        let r = service.create_reservation("cust-1", req).await.unwrap();
        // 100*3 + 25*3, the unknown id contributes nothing
        assert_eq!(r.total_price, Decimal::from(375));
    }

    #[tokio::test]
    async fn creation_appends_notification_and_publishes_event() {
        let (repos, service) = setup().await;
        let mut subscriber = service.event_bus.subscribe();

        service
            .create_reservation("cust-1", request(at(10, 9), at(12, 9)))
            .await
            .unwrap();

        assert_eq!(repos.notifications().unread_count("cust-1").await.unwrap(), 1);

        let msg = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            subscriber.recv(),
        )
        .await
        .expect("Timeout")
        .expect("No message");
        assert_eq!(msg.event.event_type(), "reservation_created");
        assert_eq!(msg.event.user_id(), Some("cust-1"));
    }

    #[tokio::test]
    async fn quote_persists_nothing() {
        let (repos, service) = setup().await;
        let breakdown = service
            .quote("veh-1", at(10, 9), at(12, 9), true, &["opt-gps".into()])
            .await
            .unwrap();
        assert_eq!(breakdown.total, Decimal::from(615));

        let listed = repos
            .reservations()
            .search(&ReservationQuery {
                page: 1,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.total, 0);
    }

    #[tokio::test]
    async fn stored_total_survives_catalog_and_price_changes() {
        let (repos, service) = setup().await;
        let mut req = request(at(10, 9), at(12, 9));
        req.selected_option_ids = vec!["opt-gps".into()];
        let r = service.create_reservation("cust-1", req).await.unwrap();
        let priced = r.total_price;

        // reprice the vehicle and drop the option from the catalog
        let mut vehicle = repos.vehicles().find_by_id("veh-1").await.unwrap().unwrap();
        vehicle.price_per_day = Decimal::from(500);
        repos.vehicles().update(vehicle).await.unwrap();
        repos.rental_options().delete("opt-gps").await.unwrap();

        service.confirm(&r.id, &Actor::Admin).await.unwrap();
        service.complete(&r.id, &Actor::Admin).await.unwrap();

        let stored = repos.reservations().find_by_id(&r.id).await.unwrap().unwrap();
        assert_eq!(stored.total_price, priced);
        assert_eq!(stored.status, ReservationStatus::Completed);
    }

    #[tokio::test]
    async fn owner_cancels_but_stranger_cannot() {
        let (_, service) = setup().await;
        let r = service
            .create_reservation("cust-1", request(at(10, 9), at(12, 9)))
            .await
            .unwrap();

        let err = service
            .cancel(&r.id, &Actor::Customer("cust-2".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let cancelled = service
            .cancel(&r.id, &Actor::Customer("cust-1".into()))
            .await
            .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn customer_cannot_confirm() {
        let (_, service) = setup().await;
        let r = service
            .create_reservation("cust-1", request(at(10, 9), at(12, 9)))
            .await
            .unwrap();
        let err = service
            .confirm(&r.id, &Actor::Customer("cust-1".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn lifecycle_notifications_accumulate() {
        let (repos, service) = setup().await;
        let r = service
            .create_reservation("cust-1", request(at(10, 9), at(12, 9)))
            .await
            .unwrap();
        service.confirm(&r.id, &Actor::Admin).await.unwrap();
        service.complete(&r.id, &Actor::Admin).await.unwrap();

        assert_eq!(repos.notifications().unread_count("cust-1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn customer_sees_only_own_reservation() {
        let (_, service) = setup().await;
        let r = service
            .create_reservation("cust-1", request(at(10, 9), at(12, 9)))
            .await
            .unwrap();

        assert!(service.get_reservation(&r.id, &Actor::Admin).await.is_ok());
        assert!(service
            .get_reservation(&r.id, &Actor::Customer("cust-1".into()))
            .await
            .is_ok());
        let err = service
            .get_reservation(&r.id, &Actor::Customer("cust-2".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn equal_endpoints_price_one_day() {
        let (_, service) = setup().await;
        let start = at(10, 9);
        let r = service
            .create_reservation("cust-1", request(start, start))
            .await
            .unwrap();
        assert_eq!(r.total_price, Decimal::from(100));
    }

    #[tokio::test]
    async fn own_listing_is_scoped() {
        let (_, service) = setup().await;
        service
            .create_reservation("cust-1", request(at(10, 9), at(12, 9)))
            .await
            .unwrap();
        service
            .create_reservation("cust-2", request(at(5, 9), at(6, 9)))
            .await
            .unwrap();

        let mine = service.list_own("cust-1", None, 1, 10).await.unwrap();
        assert_eq!(mine.total, 1);
        assert!(mine.items.iter().all(|r| r.customer_id == "cust-1"));

        let all = service
            .list_reservations(&ReservationQuery {
                page: 1,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.total, 2);
    }
}
