//! SeaORM implementation of RentalOptionRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::domain::rental_option::{RentalOption, RentalOptionRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::rental_option;

pub struct SeaOrmRentalOptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmRentalOptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn model_to_domain(m: rental_option::Model) -> RentalOption {
    RentalOption {
        id: m.id,
        name: m.name,
        description: m.description,
        price_per_day: m.price_per_day,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── RentalOptionRepository impl ─────────────────────────────────

#[async_trait]
impl RentalOptionRepository for SeaOrmRentalOptionRepository {
    async fn save(&self, o: RentalOption) -> DomainResult<()> {
        debug!("Saving rental option: {}", o.id);

        let model = rental_option::ActiveModel {
            id: Set(o.id),
            name: Set(o.name),
            description: Set(o.description),
            price_per_day: Set(o.price_per_day),
            created_at: Set(o.created_at),
            updated_at: Set(o.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RentalOption>> {
        let model = rental_option::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<RentalOption>> {
        let models = rental_option::Entity::find()
            .order_by_asc(rental_option::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, o: RentalOption) -> DomainResult<()> {
        let existing = rental_option::Entity::find_by_id(&o.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "RentalOption",
                field: "id",
                value: o.id,
            });
        };

        let model = rental_option::ActiveModel {
            id: Set(o.id),
            name: Set(o.name),
            description: Set(o.description),
            price_per_day: Set(o.price_per_day),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = rental_option::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "RentalOption",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
