//! Statistics API handlers
//!
//! All endpoints query SeaORM entities directly and aggregate in memory.
//! A read that fails mid-dashboard degrades to zeroes instead of a 500.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, Duration, NaiveTime, Utc};
use sea_orm::prelude::*;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::dto::*;
use crate::infrastructure::database::entities::{
    app_settings, notification as notification_entity, reservation as reservation_entity,
    user as user_entity, vehicle as vehicle_entity,
};
use crate::interfaces::http::common::ApiResponse;
use crate::shared::types::time::day_key;

/// Statistics handler state.
#[derive(Clone)]
pub struct StatisticsState {
    pub db: DatabaseConnection,
}

// ── Query params ───────────────────────────────────────────────

/// Look-back window for the revenue endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct RevenueParams {
    /// Number of days to look back (default 30, max 365).
    pub days: Option<u32>,
}

/// Result size for the top-vehicles endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct TopVehiclesParams {
    /// Number of vehicles to return (default 5, max 50).
    pub limit: Option<u32>,
}

// ── 1. Summary ─────────────────────────────────────────────────

/// Overall dashboard summary.
#[utoipa::path(
    get,
    path = "/api/v1/statistics/summary",
    tag = "Statistics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<FleetSummary>)
    )
)]
pub async fn statistics_summary(
    State(state): State<StatisticsState>,
) -> Result<Json<ApiResponse<FleetSummary>>, (StatusCode, Json<ApiResponse<FleetSummary>>)> {
    let db = &state.db;
    let now = Utc::now();

    // -- fleet --
    let total_vehicles = vehicle_entity::Entity::find().count(db).await.unwrap_or(0);
    let available_vehicles = vehicle_entity::Entity::find()
        .filter(vehicle_entity::Column::IsAvailable.eq(true))
        .count(db)
        .await
        .unwrap_or(0);

    // -- users --
    let total_users = user_entity::Entity::find().count(db).await.unwrap_or(0);

    // -- reservations by status --
    let total_reservations = reservation_entity::Entity::find()
        .count(db)
        .await
        .unwrap_or(0);
    let pending_reservations = reservation_entity::Entity::find()
        .filter(reservation_entity::Column::Status.eq("pending"))
        .count(db)
        .await
        .unwrap_or(0);
    let confirmed_reservations = reservation_entity::Entity::find()
        .filter(reservation_entity::Column::Status.eq("confirmed"))
        .count(db)
        .await
        .unwrap_or(0);
    let cancelled_reservations = reservation_entity::Entity::find()
        .filter(reservation_entity::Column::Status.eq("cancelled"))
        .count(db)
        .await
        .unwrap_or(0);

    let notifications_sent = notification_entity::Entity::find()
        .count(db)
        .await
        .unwrap_or(0);

    // -- revenue over completed rentals --
    let completed: Vec<reservation_entity::Model> = reservation_entity::Entity::find()
        .filter(reservation_entity::Column::Status.eq("completed"))
        .all(db)
        .await
        .unwrap_or_default();

    let month_start = now
        .date_naive()
        .with_day(1)
        .unwrap_or(now.date_naive())
        .and_time(NaiveTime::MIN)
        .and_utc();

    let mut revenue_total = Decimal::ZERO;
    let mut revenue_month = Decimal::ZERO;
    for r in &completed {
        revenue_total += r.total_price;
        // updated_at is the completion stamp on completed rows
        if r.updated_at >= month_start {
            revenue_month += r.total_price;
        }
    }

    Ok(Json(ApiResponse::success(FleetSummary {
        total_vehicles,
        available_vehicles,
        total_users,
        total_reservations,
        pending_reservations,
        confirmed_reservations,
        completed_reservations: completed.len() as u64,
        cancelled_reservations,
        notifications_sent,
        revenue_total,
        revenue_month,
        currency: display_currency(db).await,
    })))
}

// ── 2. Revenue ─────────────────────────────────────────────────

/// Daily revenue over completed rentals.
#[utoipa::path(
    get,
    path = "/api/v1/statistics/revenue",
    tag = "Statistics",
    params(
        ("days" = Option<u32>, Query, description = "Look-back period in days (default 30, max 365)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daily revenue breakdown", body = ApiResponse<RevenueResponse>)
    )
)]
pub async fn statistics_revenue(
    State(state): State<StatisticsState>,
    Query(params): Query<RevenueParams>,
) -> Result<Json<ApiResponse<RevenueResponse>>, (StatusCode, Json<ApiResponse<RevenueResponse>>)> {
    let db = &state.db;
    let days = params.days.unwrap_or(30).clamp(1, 365);
    let since = Utc::now() - Duration::days(days as i64);

    let rows: Vec<reservation_entity::Model> = reservation_entity::Entity::find()
        .filter(
            Condition::all()
                .add(reservation_entity::Column::Status.eq("completed"))
                .add(reservation_entity::Column::UpdatedAt.gte(since)),
        )
        .order_by_asc(reservation_entity::Column::UpdatedAt)
        .all(db)
        .await
        .unwrap_or_default();

    let mut bucket_map: std::collections::BTreeMap<String, (Decimal, u64)> =
        std::collections::BTreeMap::new();

    for r in &rows {
        let entry = bucket_map
            .entry(day_key(r.updated_at))
            .or_insert((Decimal::ZERO, 0));
        entry.0 += r.total_price;
        entry.1 += 1;
    }

    let mut total_revenue = Decimal::ZERO;
    let buckets: Vec<RevenueBucket> = bucket_map
        .into_iter()
        .map(|(day, (revenue, count))| {
            total_revenue += revenue;
            RevenueBucket {
                day,
                revenue,
                reservation_count: count,
            }
        })
        .collect();

    Ok(Json(ApiResponse::success(RevenueResponse {
        days,
        buckets,
        total_revenue,
        currency: display_currency(db).await,
    })))
}

// ── 3. Top vehicles ────────────────────────────────────────────

/// Most-booked vehicles by reservation count.
#[utoipa::path(
    get,
    path = "/api/v1/statistics/top-vehicles",
    tag = "Statistics",
    params(
        ("limit" = Option<u32>, Query, description = "Number of vehicles to return (default 5, max 50)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Most-booked vehicles", body = ApiResponse<TopVehiclesResponse>)
    )
)]
pub async fn statistics_top_vehicles(
    State(state): State<StatisticsState>,
    Query(params): Query<TopVehiclesParams>,
) -> Result<Json<ApiResponse<TopVehiclesResponse>>, (StatusCode, Json<ApiResponse<TopVehiclesResponse>>)>
{
    let db = &state.db;
    let limit = params.limit.unwrap_or(5).clamp(1, 50) as usize;

    // Cancelled bookings carry no revenue and say nothing about demand
    let rows: Vec<reservation_entity::Model> = reservation_entity::Entity::find()
        .filter(reservation_entity::Column::Status.ne("cancelled"))
        .all(db)
        .await
        .unwrap_or_default();

    let mut agg: std::collections::HashMap<String, (u64, Decimal)> =
        std::collections::HashMap::new();
    for r in &rows {
        let entry = agg
            .entry(r.vehicle_id.clone())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += r.total_price;
    }

    let mut ranked: Vec<(String, u64, Decimal)> = agg
        .into_iter()
        .map(|(id, (count, revenue))| (id, count, revenue))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.2.cmp(&a.2)));
    ranked.truncate(limit);

    // Reservations outlive fleet edits, so metadata lookup can miss
    let by_id: std::collections::HashMap<String, vehicle_entity::Model> =
        vehicle_entity::Entity::find()
            .all(db)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|v| (v.id.clone(), v))
            .collect();

    let vehicles: Vec<TopVehicleEntry> = ranked
        .into_iter()
        .map(|(vehicle_id, reservation_count, revenue)| {
            let meta = by_id.get(&vehicle_id);
            TopVehicleEntry {
                brand: meta.map(|v| v.brand.clone()),
                model: meta.map(|v| v.model.clone()),
                year: meta.map(|v| v.year),
                vehicle_id,
                reservation_count,
                revenue,
            }
        })
        .collect();

    Ok(Json(ApiResponse::success(TopVehiclesResponse { vehicles })))
}

// ── Helpers ────────────────────────────────────────────────────

/// Display currency from the settings row, "USD" when unset.
async fn display_currency(db: &DatabaseConnection) -> String {
    app_settings::Entity::find_by_id(app_settings::SETTINGS_ROW_ID)
        .one(db)
        .await
        .unwrap_or_default()
        .map(|s| s.currency)
        .unwrap_or_else(|| "USD".to_string())
}
