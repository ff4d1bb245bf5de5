//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::vehicle::{AvailabilityPeriod, Vehicle, VehicleQuery, VehicleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{availability_period, vehicle};
use crate::shared::PaginatedResult;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn model_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        brand: m.brand,
        model: m.model,
        year: m.year,
        price_per_day: m.price_per_day,
        description: m.description,
        image_url: m.image_url,
        is_available: m.is_available,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn period_to_domain(m: availability_period::Model) -> AvailabilityPeriod {
    AvailabilityPeriod {
        id: m.id,
        vehicle_id: m.vehicle_id,
        start_date_time: m.start_date_time,
        end_date_time: m.end_date_time,
    }
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn save(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Saving vehicle: {}", v.id);

        let model = vehicle::ActiveModel {
            id: Set(v.id),
            brand: Set(v.brand),
            model: Set(v.model),
            year: Set(v.year),
            price_per_day: Set(v.price_per_day),
            description: Set(v.description),
            image_url: Set(v.image_url),
            is_available: Set(v.is_available),
            created_at: Set(v.created_at),
            updated_at: Set(v.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn search(&self, query: &VehicleQuery) -> DomainResult<PaginatedResult<Vehicle>> {
        let mut q = vehicle::Entity::find();

        if let Some(ref search) = query.search {
            q = q.filter(
                vehicle::Column::Brand
                    .contains(search)
                    .or(vehicle::Column::Model.contains(search)),
            );
        }
        if let Some(ref brand) = query.brand {
            q = q.filter(vehicle::Column::Brand.eq(brand));
        }
        if let Some(min) = query.min_price {
            q = q.filter(vehicle::Column::PricePerDay.gte(min));
        }
        if let Some(max) = query.max_price {
            q = q.filter(vehicle::Column::PricePerDay.lte(max));
        }
        if let Some(available) = query.available {
            q = q.filter(vehicle::Column::IsAvailable.eq(available));
        }

        q = q
            .order_by_asc(vehicle::Column::Brand)
            .order_by_asc(vehicle::Column::Model);

        let total = q.clone().count(&self.db).await.map_err(db_err)?;

        let offset = ((query.page - 1) * query.limit) as u64;
        let models = q
            .offset(offset)
            .limit(query.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<Vehicle> = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, query.page, query.limit))
    }

    async fn update(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Updating vehicle: {}", v.id);

        let existing = vehicle::Entity::find_by_id(&v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: v.id,
            });
        };

        let model = vehicle::ActiveModel {
            id: Set(v.id),
            brand: Set(v.brand),
            model: Set(v.model),
            year: Set(v.year),
            price_per_day: Set(v.price_per_day),
            description: Set(v.description),
            image_url: Set(v.image_url),
            is_available: Set(v.is_available),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn set_availability_flag(&self, id: &str, available: bool) -> DomainResult<()> {
        let existing = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: vehicle::ActiveModel = existing.into();
        active.is_available = Set(available);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        // Periods go through the FK cascade; reservations keep their copy.
        let result = vehicle::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }

    async fn periods_for(&self, vehicle_id: &str) -> DomainResult<Vec<AvailabilityPeriod>> {
        let models = availability_period::Entity::find()
            .filter(availability_period::Column::VehicleId.eq(vehicle_id))
            .order_by_asc(availability_period::Column::StartDateTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(period_to_domain).collect())
    }

    async fn replace_periods(
        &self,
        vehicle_id: &str,
        periods: Vec<AvailabilityPeriod>,
    ) -> DomainResult<()> {
        debug!(
            "Replacing {} availability periods for vehicle {}",
            periods.len(),
            vehicle_id
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        availability_period::Entity::delete_many()
            .filter(availability_period::Column::VehicleId.eq(vehicle_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        for p in periods {
            let model = availability_period::ActiveModel {
                id: Set(p.id),
                vehicle_id: Set(p.vehicle_id),
                start_date_time: Set(p.start_date_time),
                end_date_time: Set(p.end_date_time),
            };
            model.insert(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
