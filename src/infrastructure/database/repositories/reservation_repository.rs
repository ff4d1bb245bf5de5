//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::reservation::{
    Reservation, ReservationQuery, ReservationRepository, ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;
use crate::shared::PaginatedResult;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

/// Option ids live in a JSON text column
fn encode_option_ids(ids: &[String]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

fn decode_option_ids(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        vehicle_id: m.vehicle_id,
        customer_id: m.customer_id,
        start_date_time: m.start_date_time,
        end_date_time: m.end_date_time,
        pickup_location: m.pickup_location,
        return_location: m.return_location,
        with_driver: m.with_driver,
        selected_option_ids: decode_option_ids(&m.selected_option_ids),
        total_price: m.total_price,
        status: ReservationStatus::from_str(&m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn save(&self, r: Reservation) -> DomainResult<()> {
        debug!("Saving reservation: {}", r.id);

        let model = reservation::ActiveModel {
            id: Set(r.id),
            vehicle_id: Set(r.vehicle_id),
            customer_id: Set(r.customer_id),
            start_date_time: Set(r.start_date_time),
            end_date_time: Set(r.end_date_time),
            pickup_location: Set(r.pickup_location),
            return_location: Set(r.return_location),
            with_driver: Set(r.with_driver),
            selected_option_ids: Set(encode_option_ids(&r.selected_option_ids)),
            total_price: Set(r.total_price),
            status: Set(r.status.as_str().to_string()),
            created_at: Set(r.created_at),
            updated_at: Set(r.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn search(&self, query: &ReservationQuery) -> DomainResult<PaginatedResult<Reservation>> {
        let mut q = reservation::Entity::find();

        if let Some(ref status) = query.status {
            q = q.filter(reservation::Column::Status.eq(status.as_str()));
        }
        if let Some(ref vehicle_id) = query.vehicle_id {
            q = q.filter(reservation::Column::VehicleId.eq(vehicle_id));
        }
        if let Some(ref customer_id) = query.customer_id {
            q = q.filter(reservation::Column::CustomerId.eq(customer_id));
        }

        q = q.order_by_desc(reservation::Column::CreatedAt);

        let total = q.clone().count(&self.db).await.map_err(db_err)?;

        let offset = ((query.page - 1) * query.limit) as u64;
        let models = q
            .offset(offset)
            .limit(query.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items: Vec<Reservation> = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, query.page, query.limit))
    }

    async fn update_status(&self, id: &str, status: ReservationStatus) -> DomainResult<()> {
        debug!("Updating reservation {} status to {}", id, status.as_str());

        let existing = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            });
        };

        // Only the status column moves; the priced total stays as stored.
        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_ids_roundtrip() {
        let ids = vec!["opt-1".to_string(), "opt-2".to_string()];
        let raw = encode_option_ids(&ids);
        assert_eq!(raw, r#"["opt-1","opt-2"]"#);
        assert_eq!(decode_option_ids(&raw), ids);
    }

    #[test]
    fn empty_option_ids_encode_as_empty_array() {
        assert_eq!(encode_option_ids(&[]), "[]");
        assert!(decode_option_ids("[]").is_empty());
    }

    #[test]
    fn malformed_column_decodes_to_empty() {
        assert!(decode_option_ids("not json").is_empty());
        assert!(decode_option_ids("").is_empty());
    }
}
