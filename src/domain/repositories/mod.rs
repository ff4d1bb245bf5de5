//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::notification::NotificationRepository;
use super::rental_option::RentalOptionRepository;
use super::reservation::ReservationRepository;
use super::settings::SettingsRepository;
use super::vehicle::VehicleRepository;
use crate::shared::types::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let vehicle = repos.vehicles().find_by_id("veh-1").await?;
///     let catalog = repos.rental_options().find_all().await?;
/// }
/// ```
///
/// Users are managed through `UserRepositoryInterface` directly; identity
/// concerns stay out of the booking provider.
pub trait RepositoryProvider: Send + Sync {
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn rental_options(&self) -> &dyn RentalOptionRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn notifications(&self) -> &dyn NotificationRepository;
    fn settings(&self) -> &dyn SettingsRepository;
}
