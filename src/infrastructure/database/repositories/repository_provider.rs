//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::notification::NotificationRepository;
use crate::domain::rental_option::RentalOptionRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::settings::SettingsRepository;
use crate::domain::vehicle::VehicleRepository;

use super::notification_repository::SeaOrmNotificationRepository;
use super::rental_option_repository::SeaOrmRentalOptionRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::settings_repository::SeaOrmSettingsRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let car = repos.vehicles().find_by_id("veh-1").await?;
/// let booking = repos.reservations().find_by_id("res-1").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmVehicleRepository,
    rental_options: SeaOrmRentalOptionRepository,
    reservations: SeaOrmReservationRepository,
    notifications: SeaOrmNotificationRepository,
    settings: SeaOrmSettingsRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            rental_options: SeaOrmRentalOptionRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            notifications: SeaOrmNotificationRepository::new(db.clone()),
            settings: SeaOrmSettingsRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn rental_options(&self) -> &dyn RentalOptionRepository {
        &self.rental_options
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.notifications
    }

    fn settings(&self) -> &dyn SettingsRepository {
        &self.settings
    }
}
