//! Fleet service — vehicle, availability and option catalog management
//!
//! All fleet business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::rental_option::RentalOption;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::vehicle::{
    group_by_day, has_availability, is_available_on, AvailabilityPeriod, DayGroup, Vehicle,
    VehicleQuery,
};
use crate::domain::{DomainError, DomainResult};
use crate::notifications::event_bus::SharedEventBus;
use crate::notifications::events::{AvailabilityChangedEvent, Event};
use crate::shared::PaginatedResult;

/// Payload for creating or updating a vehicle
#[derive(Debug, Clone)]
pub struct VehiclePayload {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: rust_decimal::Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// One availability window in a replacement request
#[derive(Debug, Clone)]
pub struct PeriodPayload {
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}

/// Fleet service — vehicle CRUD, availability periods, option catalog.
pub struct FleetService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl FleetService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    // ── Vehicles ────────────────────────────────────────────────

    pub async fn create_vehicle(&self, payload: VehiclePayload) -> DomainResult<Vehicle> {
        let mut vehicle = Vehicle::new(
            Uuid::new_v4().to_string(),
            payload.brand,
            payload.model,
            payload.year,
            payload.price_per_day,
        );
        vehicle.description = payload.description;
        vehicle.image_url = payload.image_url;
        vehicle.validate()?;

        self.repos.vehicles().save(vehicle.clone()).await?;
        info!(vehicle_id = %vehicle.id, "Vehicle created: {}", vehicle.display_name());
        Ok(vehicle)
    }

    pub async fn update_vehicle(&self, id: &str, payload: VehiclePayload) -> DomainResult<Vehicle> {
        let mut vehicle = self.vehicle_or_not_found(id).await?;
        vehicle.brand = payload.brand;
        vehicle.model = payload.model;
        vehicle.year = payload.year;
        vehicle.price_per_day = payload.price_per_day;
        vehicle.description = payload.description;
        vehicle.image_url = payload.image_url;
        vehicle.validate()?;

        self.repos.vehicles().update(vehicle.clone()).await?;
        Ok(vehicle)
    }

    /// Delete a vehicle and its availability periods. Reservations that
    /// reference the vehicle are left in place.
    pub async fn delete_vehicle(&self, id: &str) -> DomainResult<()> {
        self.repos.vehicles().delete(id).await?;
        info!(vehicle_id = %id, "Vehicle deleted");
        Ok(())
    }

    pub async fn get_vehicle(&self, id: &str) -> DomainResult<Vehicle> {
        self.vehicle_or_not_found(id).await
    }

    pub async fn list_vehicles(
        &self,
        query: &VehicleQuery,
    ) -> DomainResult<PaginatedResult<Vehicle>> {
        self.repos.vehicles().search(query).await
    }

    // ── Availability periods ────────────────────────────────────

    /// Replace the vehicle's full period collection. All submitted periods
    /// must be valid or the whole replacement is rejected. The derived
    /// availability flag follows the new collection.
    pub async fn replace_periods(
        &self,
        vehicle_id: &str,
        payloads: Vec<PeriodPayload>,
    ) -> DomainResult<Vec<AvailabilityPeriod>> {
        let vehicle = self.vehicle_or_not_found(vehicle_id).await?;

        let periods: Vec<AvailabilityPeriod> = payloads
            .into_iter()
            .map(|p| {
                AvailabilityPeriod::new(
                    Uuid::new_v4().to_string(),
                    vehicle.id.clone(),
                    p.start_date_time,
                    p.end_date_time,
                )
            })
            .collect();

        for period in &periods {
            period.validate()?;
        }

        self.repos
            .vehicles()
            .replace_periods(&vehicle.id, periods.clone())
            .await?;

        let available = has_availability(&periods);
        self.repos
            .vehicles()
            .set_availability_flag(&vehicle.id, available)
            .await?;

        info!(
            vehicle_id = %vehicle.id,
            period_count = periods.len(),
            available,
            "Availability periods replaced"
        );

        self.event_bus
            .publish(Event::AvailabilityChanged(AvailabilityChangedEvent {
                vehicle_id: vehicle.id.clone(),
                period_count: periods.len(),
                is_available: available,
                timestamp: Utc::now(),
            }));

        Ok(periods)
    }

    pub async fn periods_for(&self, vehicle_id: &str) -> DomainResult<Vec<AvailabilityPeriod>> {
        self.vehicle_or_not_found(vehicle_id).await?;
        self.repos.vehicles().periods_for(vehicle_id).await
    }

    /// Calendar view of a vehicle's periods, grouped by start day.
    pub async fn periods_by_day(&self, vehicle_id: &str) -> DomainResult<Vec<DayGroup>> {
        let periods = self.periods_for(vehicle_id).await?;
        Ok(group_by_day(&periods))
    }

    /// Calendar-day availability check for a single instant.
    pub async fn check_availability_on(
        &self,
        vehicle_id: &str,
        instant: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let periods = self.periods_for(vehicle_id).await?;
        Ok(is_available_on(instant, &periods))
    }

    // ── Option catalog ──────────────────────────────────────────

    pub async fn create_option(
        &self,
        name: String,
        description: Option<String>,
        price_per_day: rust_decimal::Decimal,
    ) -> DomainResult<RentalOption> {
        let option = RentalOption::new(Uuid::new_v4().to_string(), name, description, price_per_day);
        option.validate()?;
        self.repos.rental_options().save(option.clone()).await?;
        info!(option_id = %option.id, "Rental option created: {}", option.name);
        Ok(option)
    }

    pub async fn update_option(
        &self,
        id: &str,
        name: String,
        description: Option<String>,
        price_per_day: rust_decimal::Decimal,
    ) -> DomainResult<RentalOption> {
        let mut option = self
            .repos
            .rental_options()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "RentalOption",
                field: "id",
                value: id.to_string(),
            })?;

        option.name = name;
        option.description = description;
        option.price_per_day = price_per_day;
        option.validate()?;

        self.repos.rental_options().update(option.clone()).await?;
        Ok(option)
    }

    /// Delete an option. Reservations keep the id in their stored selection.
    pub async fn delete_option(&self, id: &str) -> DomainResult<()> {
        self.repos.rental_options().delete(id).await
    }

    pub async fn get_option(&self, id: &str) -> DomainResult<RentalOption> {
        self.repos
            .rental_options()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "RentalOption",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn list_options(&self) -> DomainResult<Vec<RentalOption>> {
        self.repos.rental_options().find_all().await
    }

    // ── Helpers ─────────────────────────────────────────────────

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
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use crate::infrastructure::storage::InMemoryRepositories;
    use crate::notifications::event_bus::create_event_bus;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, d, h, 0, 0).unwrap()
    }

    fn payload() -> VehiclePayload {
        VehiclePayload {
            brand: "Toyota".into(),
            model: "Camry".into(),
            year: 2022,
            price_per_day: Decimal::from(100),
            description: None,
            image_url: None,
        }
    }

    async fn setup() -> (Arc<InMemoryRepositories>, FleetService) {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = FleetService::new(repos.clone(), create_event_bus());
        (repos, service)
    }

    #[tokio::test]
    async fn created_vehicle_starts_unavailable() {
        let (_, service) = setup().await;
        let v = service.create_vehicle(payload()).await.unwrap();
        assert!(!v.is_available);
        assert_eq!(service.get_vehicle(&v.id).await.unwrap().id, v.id);
    }

    #[tokio::test]
    async fn invalid_vehicle_is_rejected() {
        let (_, service) = setup().await;
        let mut bad = payload();
        bad.year = 1800;
        assert!(service.create_vehicle(bad).await.is_err());

        let mut bad = payload();
        bad.price_per_day = Decimal::ZERO;
        assert!(service.create_vehicle(bad).await.is_err());
    }

    #[tokio::test]
    async fn replacing_periods_flips_availability_flag() {
        let (_, service) = setup().await;
        let v = service.create_vehicle(payload()).await.unwrap();

        let periods = service
            .replace_periods(
                &v.id,
                vec![PeriodPayload {
                    start_date_time: at(1, 0),
                    end_date_time: at(10, 0),
                }],
            )
            .await
            .unwrap();
        assert_eq!(periods.len(), 1);
        assert!(service.get_vehicle(&v.id).await.unwrap().is_available);

        // empty replacement clears the flag
        service.replace_periods(&v.id, vec![]).await.unwrap();
        assert!(!service.get_vehicle(&v.id).await.unwrap().is_available);
    }

    #[tokio::test]
    async fn invalid_period_rejects_whole_batch() {
        let (_, service) = setup().await;
        let v = service.create_vehicle(payload()).await.unwrap();

        let err = service
            .replace_periods(
                &v.id,
                vec![
                    PeriodPayload {
                        start_date_time: at(1, 0),
                        end_date_time: at(10, 0),
                    },
                    PeriodPayload {
                        start_date_time: at(12, 0),
                        end_date_time: at(12, 0),
                    },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn replacement_publishes_availability_event() {
        let (_, service) = setup().await;
        let v = service.create_vehicle(payload()).await.unwrap();
        let mut subscriber = service.event_bus.subscribe();

        service
            .replace_periods(
                &v.id,
                vec![PeriodPayload {
                    start_date_time: at(1, 0),
                    end_date_time: at(10, 0),
                }],
            )
            .await
            .unwrap();

        let msg = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            subscriber.recv(),
        )
        .await
        .expect("Timeout")
        .expect("No message");
        assert_eq!(msg.event.event_type(), "availability_changed");
    }

    #[tokio::test]
    async fn day_check_widens_periods() {
        let (_, service) = setup().await;
        let v = service.create_vehicle(payload()).await.unwrap();
        service
            .replace_periods(
                &v.id,
                vec![PeriodPayload {
                    start_date_time: at(15, 10),
                    end_date_time: at(17, 14),
                }],
            )
            .await
            .unwrap();

        // before the period's clock time on its first day still counts
        assert!(service.check_availability_on(&v.id, at(15, 8)).await.unwrap());
        assert!(service.check_availability_on(&v.id, at(17, 23)).await.unwrap());
        assert!(!service.check_availability_on(&v.id, at(18, 0)).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_vehicle_removes_periods() {
        let (repos, service) = setup().await;
        let v = service.create_vehicle(payload()).await.unwrap();
        service
            .replace_periods(
                &v.id,
                vec![PeriodPayload {
                    start_date_time: at(1, 0),
                    end_date_time: at(10, 0),
                }],
            )
            .await
            .unwrap();

        service.delete_vehicle(&v.id).await.unwrap();
        assert!(service.get_vehicle(&v.id).await.is_err());
        assert!(repos.vehicles().periods_for(&v.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn option_catalog_crud() {
        let (_, service) = setup().await;
        let o = service
            .create_option("GPS".into(), None, Decimal::from(25))
            .await
            .unwrap();

        let updated = service
            .update_option(&o.id, "GPS Pro".into(), None, Decimal::from(30))
            .await
            .unwrap();
        assert_eq!(updated.name, "GPS Pro");

        let all = service.list_options().await.unwrap();
        assert_eq!(all.len(), 1);

        service.delete_option(&o.id).await.unwrap();
        assert!(service.get_option(&o.id).await.is_err());
    }

    #[tokio::test]
    async fn negative_option_price_rejected() {
        let (_, service) = setup().await;
        let err = service
            .create_option("GPS".into(), None, Decimal::from(-5))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
