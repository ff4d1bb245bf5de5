//! Reservation repository interface

use async_trait::async_trait;

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;
use crate::shared::types::pagination::PaginatedResult;

/// Filters for reservation listings
#[derive(Debug, Clone, Default)]
pub struct ReservationQuery {
    pub status: Option<ReservationStatus>,
    pub vehicle_id: Option<String>,
    pub customer_id: Option<String>,
    pub page: u32,
    pub limit: u32,
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Save a new reservation
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    /// Filtered, paginated listing, newest first
    async fn search(&self, query: &ReservationQuery) -> DomainResult<PaginatedResult<Reservation>>;

    /// Persist a status change. Writes only `status` and `updated_at`;
    /// the priced total stored at creation stays untouched by contract.
    async fn update_status(&self, id: &str, status: ReservationStatus) -> DomainResult<()>;
}
