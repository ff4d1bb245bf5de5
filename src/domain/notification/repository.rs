//! Notification repository interface

use async_trait::async_trait;

use super::model::Notification;
use crate::domain::DomainResult;
use crate::shared::types::pagination::PaginatedResult;

/// Scope for a user's notification feed
#[derive(Debug, Clone)]
pub struct NotificationQuery {
    pub user_id: String,
    pub unread_only: bool,
    pub page: u32,
    pub limit: u32,
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification
    async fn save(&self, notification: Notification) -> DomainResult<()>;

    /// A user's feed, newest first
    async fn find_for_user(
        &self,
        query: &NotificationQuery,
    ) -> DomainResult<PaginatedResult<Notification>>;

    /// Unread rows for the badge counter
    async fn unread_count(&self, user_id: &str) -> DomainResult<u64>;

    /// Mark one notification read; scoped to the owner
    async fn mark_read(&self, id: &str, user_id: &str) -> DomainResult<()>;

    /// Mark the whole feed read, returning how many rows flipped
    async fn mark_all_read(&self, user_id: &str) -> DomainResult<u64>;
}
