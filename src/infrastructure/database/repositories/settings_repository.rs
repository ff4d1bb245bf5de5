//! SeaORM implementation of SettingsRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::settings::{AppSettings, SettingsRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::app_settings::{self, SETTINGS_ROW_ID};

pub struct SeaOrmSettingsRepository {
    db: DatabaseConnection,
}

impl SeaOrmSettingsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn model_to_domain(m: app_settings::Model) -> AppSettings {
    AppSettings {
        currency: m.currency,
        contact_email: m.contact_email,
        contact_phone: m.contact_phone,
        maintenance_mode: m.maintenance_mode,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl SettingsRepository for SeaOrmSettingsRepository {
    async fn get(&self) -> DomainResult<AppSettings> {
        let model = app_settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain).unwrap_or_default())
    }

    async fn update(&self, settings: AppSettings) -> DomainResult<AppSettings> {
        debug!("Updating application settings");

        let existing = app_settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let model = app_settings::ActiveModel {
            id: Set(SETTINGS_ROW_ID),
            currency: Set(settings.currency),
            contact_email: Set(settings.contact_email),
            contact_phone: Set(settings.contact_phone),
            maintenance_mode: Set(settings.maintenance_mode),
            updated_at: Set(Utc::now()),
        };

        let saved = if existing.is_some() {
            model.update(&self.db).await.map_err(db_err)?
        } else {
            model.insert(&self.db).await.map_err(db_err)?
        };

        Ok(model_to_domain(saved))
    }
}
