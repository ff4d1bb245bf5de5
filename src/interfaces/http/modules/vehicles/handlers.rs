//! Vehicle REST API handlers
//!
//! Listing, detail and availability reads are public storefront endpoints;
//! fleet mutations sit behind the admin layer in the router.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AvailabilityCheckParams, AvailabilityCheckResponse, DayGroupDto, ListVehiclesParams, PeriodDto,
    QuoteRequest, QuoteResponse, ReplacePeriodsRequest, VehicleDto, VehicleRequest,
};
use crate::application::booking::BookingService;
use crate::application::fleet::{FleetService, PeriodPayload, VehiclePayload};
use crate::domain::pricing::format_price;
use crate::domain::vehicle::VehicleQuery;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::shared::PaginationParams;

/// Application state for vehicle handlers.
#[derive(Clone)]
pub struct VehicleHandlerState {
    pub fleet_service: Arc<FleetService>,
    pub booking_service: Arc<BookingService>,
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(ListVehiclesParams),
    responses(
        (status = 200, description = "Vehicle list", body = PaginatedResponse<VehicleDto>)
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleHandlerState>,
    Query(params): Query<ListVehiclesParams>,
) -> Result<Json<PaginatedResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let paging = PaginationParams::clamped(params.page, params.limit);
    let query = VehicleQuery {
        search: params.search,
        brand: params.brand,
        min_price: params.min_price,
        max_price: params.max_price,
        available: params.available,
        page: paging.page,
        limit: paging.limit,
    };

    match state.fleet_service.list_vehicles(&query).await {
        Ok(result) => Ok(Json(PaginatedResponse::from_result(result, VehicleDto::from))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<VehicleDto>>)> {
    match state.fleet_service.get_vehicle(&id).await {
        Ok(vehicle) => Ok(Json(ApiResponse::success(VehicleDto::from(vehicle)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Invalid data"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleHandlerState>,
    ValidatedJson(req): ValidatedJson<VehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), (StatusCode, Json<ApiResponse<VehicleDto>>)>
{
    let payload = VehiclePayload {
        brand: req.brand,
        model: req.model,
        year: req.year,
        price_per_day: req.price_per_day,
        description: req.description,
        image_url: req.image_url,
    };

    match state.fleet_service.create_vehicle(payload).await {
        Ok(vehicle) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(VehicleDto::from(vehicle))),
        )),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vehicle ID")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<VehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<VehicleDto>>)> {
    let payload = VehiclePayload {
        brand: req.brand,
        model: req.model,
        year: req.year,
        price_per_day: req.price_per_day,
        description: req.description,
        image_url: req.image_url,
    };

    match state.fleet_service.update_vehicle(&id, payload).await {
        Ok(vehicle) => Ok(Json(ApiResponse::success(VehicleDto::from(vehicle)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn delete_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.fleet_service.delete_vehicle(&id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(error_response(&e)),
    }
}

// ── Availability periods ────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}/availability",
    tag = "Availability",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Availability periods", body = ApiResponse<Vec<PeriodDto>>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn list_periods(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<PeriodDto>>>, (StatusCode, Json<ApiResponse<Vec<PeriodDto>>>)> {
    match state.fleet_service.periods_for(&id).await {
        Ok(periods) => Ok(Json(ApiResponse::success(
            periods.into_iter().map(PeriodDto::from).collect(),
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}/availability",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vehicle ID")),
    request_body = ReplacePeriodsRequest,
    responses(
        (status = 200, description = "Replaced periods", body = ApiResponse<Vec<PeriodDto>>),
        (status = 400, description = "Invalid period"),
        (status = 404, description = "Vehicle not found"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn replace_periods(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ReplacePeriodsRequest>,
) -> Result<Json<ApiResponse<Vec<PeriodDto>>>, (StatusCode, Json<ApiResponse<Vec<PeriodDto>>>)> {
    let payloads = req
        .periods
        .into_iter()
        .map(|p| PeriodPayload {
            start_date_time: p.start_date_time,
            end_date_time: p.end_date_time,
        })
        .collect();

    match state.fleet_service.replace_periods(&id, payloads).await {
        Ok(periods) => Ok(Json(ApiResponse::success(
            periods.into_iter().map(PeriodDto::from).collect(),
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}/availability/days",
    tag = "Availability",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Periods grouped by start day", body = ApiResponse<Vec<DayGroupDto>>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn list_periods_by_day(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<DayGroupDto>>>, (StatusCode, Json<ApiResponse<Vec<DayGroupDto>>>)>
{
    match state.fleet_service.periods_by_day(&id).await {
        Ok(groups) => Ok(Json(ApiResponse::success(
            groups.into_iter().map(DayGroupDto::from).collect(),
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}/availability/check",
    tag = "Availability",
    params(
        ("id" = String, Path, description = "Vehicle ID"),
        AvailabilityCheckParams
    ),
    responses(
        (status = 200, description = "Day-granular availability", body = ApiResponse<AvailabilityCheckResponse>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn check_availability(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
    Query(params): Query<AvailabilityCheckParams>,
) -> Result<
    Json<ApiResponse<AvailabilityCheckResponse>>,
    (StatusCode, Json<ApiResponse<AvailabilityCheckResponse>>),
> {
    match state
        .fleet_service
        .check_availability_on(&id, params.at)
        .await
    {
        Ok(available) => Ok(Json(ApiResponse::success(AvailabilityCheckResponse {
            vehicle_id: id,
            at: params.at,
            available,
        }))),
        Err(e) => Err(error_response(&e)),
    }
}

// ── Price quote ─────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{id}/quote",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Itemized price preview", body = ApiResponse<QuoteResponse>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn quote_price(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, (StatusCode, Json<ApiResponse<QuoteResponse>>)> {
    let breakdown = match state
        .booking_service
        .quote(
            &id,
            req.start_date_time,
            req.end_date_time,
            req.with_driver,
            &req.selected_option_ids,
        )
        .await
    {
        Ok(b) => b,
        Err(e) => return Err(error_response(&e)),
    };

    let currency = match state.repos.settings().get().await {
        Ok(settings) => settings.currency,
        Err(e) => return Err(error_response(&e)),
    };

    let formatted_total = format_price(breakdown.total, &currency);
    Ok(Json(ApiResponse::success(QuoteResponse::from_breakdown(
        breakdown,
        currency,
        formatted_total,
    ))))
}
