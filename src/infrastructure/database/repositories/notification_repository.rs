//! SeaORM implementation of NotificationRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::notification::{
    Notification, NotificationKind, NotificationQuery, NotificationRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::notification;
use crate::shared::PaginatedResult;

pub struct SeaOrmNotificationRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn model_to_domain(m: notification::Model) -> Notification {
    Notification {
        id: m.id,
        user_id: m.user_id,
        kind: NotificationKind::from_str(&m.kind),
        title: m.title,
        body: m.body,
        read: m.is_read,
        created_at: m.created_at,
    }
}

// ── NotificationRepository impl ─────────────────────────────────

#[async_trait]
impl NotificationRepository for SeaOrmNotificationRepository {
    async fn save(&self, n: Notification) -> DomainResult<()> {
        debug!("Saving notification {} for user {}", n.id, n.user_id);

        let model = notification::ActiveModel {
            id: Set(n.id),
            user_id: Set(n.user_id),
            kind: Set(n.kind.as_str().to_string()),
            title: Set(n.title),
            body: Set(n.body),
            is_read: Set(n.read),
            created_at: Set(n.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_for_user(
        &self,
        query: &NotificationQuery,
    ) -> DomainResult<PaginatedResult<Notification>> {
        let mut q = notification::Entity::find()
            .filter(notification::Column::UserId.eq(&query.user_id));

        if query.unread_only {
            q = q.filter(notification::Column::IsRead.eq(false));
        }

        q = q.order_by_desc(notification::Column::CreatedAt);

        let total = q.clone().count(&self.db).await.map_err(db_err)?;

        let offset = ((query.page - 1) * query.limit) as u64;
        let models = q
            .offset(offset)
            .limit(query.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<Notification> = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, query.page, query.limit))
    }

    async fn unread_count(&self, user_id: &str) -> DomainResult<u64> {
        notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn mark_read(&self, id: &str, user_id: &str) -> DomainResult<()> {
        let existing = notification::Entity::find_by_id(id)
            .filter(notification::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Notification",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: notification::ActiveModel = existing.into();
        active.is_read = Set(true);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &str) -> DomainResult<u64> {
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
