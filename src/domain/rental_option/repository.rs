//! Rental option repository interface

use async_trait::async_trait;

use super::model::RentalOption;
use crate::domain::DomainResult;

#[async_trait]
pub trait RentalOptionRepository: Send + Sync {
    /// Save a new option
    async fn save(&self, option: RentalOption) -> DomainResult<()>;

    /// Find option by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RentalOption>>;

    /// Full catalog, ordered by name
    async fn find_all(&self) -> DomainResult<Vec<RentalOption>>;

    /// Update an existing option
    async fn update(&self, option: RentalOption) -> DomainResult<()>;

    /// Delete an option (existing reservations keep the dangling id)
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
