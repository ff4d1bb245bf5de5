//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_vehicles;
mod m20250601_000003_create_availability_periods;
mod m20250601_000004_create_rental_options;
mod m20250601_000005_create_reservations;
mod m20250601_000006_create_notifications;
mod m20250601_000007_create_app_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_vehicles::Migration),
            Box::new(m20250601_000003_create_availability_periods::Migration),
            Box::new(m20250601_000004_create_rental_options::Migration),
            Box::new(m20250601_000005_create_reservations::Migration),
            Box::new(m20250601_000006_create_notifications::Migration),
            Box::new(m20250601_000007_create_app_settings::Migration),
        ]
    }
}
