//! Settings repository interface

use async_trait::async_trait;

use super::model::AppSettings;
use crate::domain::DomainResult;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Current settings; defaults when no row exists yet
    async fn get(&self) -> DomainResult<AppSettings>;

    /// Upsert the single settings row
    async fn update(&self, settings: AppSettings) -> DomainResult<AppSettings>;
}
