//! Vehicle repository interface

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::model::{AvailabilityPeriod, Vehicle};
use crate::domain::DomainResult;
use crate::shared::types::pagination::PaginatedResult;

/// Filters for the public vehicle listing
#[derive(Debug, Clone, Default)]
pub struct VehicleQuery {
    /// Case-insensitive substring over brand and model
    pub search: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub available: Option<bool>,
    pub page: u32,
    pub limit: u32,
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Save a new vehicle
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Find vehicle by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>>;

    /// Filtered, paginated listing
    async fn search(&self, query: &VehicleQuery) -> DomainResult<PaginatedResult<Vehicle>>;

    /// Update an existing vehicle
    async fn update(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Flip only the derived availability flag
    async fn set_availability_flag(&self, id: &str, available: bool) -> DomainResult<()>;

    /// Delete a vehicle; its periods go with it
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// All availability periods of a vehicle, ordered by start
    async fn periods_for(&self, vehicle_id: &str) -> DomainResult<Vec<AvailabilityPeriod>>;

    /// Replace the full period collection (delete all, insert all)
    async fn replace_periods(
        &self,
        vehicle_id: &str,
        periods: Vec<AvailabilityPeriod>,
    ) -> DomainResult<()>;
}
