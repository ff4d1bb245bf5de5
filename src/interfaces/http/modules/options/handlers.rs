//! Rental option REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{RentalOptionDto, RentalOptionRequest};
use crate::application::fleet::FleetService;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};

/// Application state for rental option handlers.
#[derive(Clone)]
pub struct OptionHandlerState {
    pub fleet_service: Arc<FleetService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/options",
    tag = "Rental Options",
    responses(
        (status = 200, description = "Option catalog", body = ApiResponse<Vec<RentalOptionDto>>)
    )
)]
pub async fn list_options(
    State(state): State<OptionHandlerState>,
) -> Result<
    Json<ApiResponse<Vec<RentalOptionDto>>>,
    (StatusCode, Json<ApiResponse<Vec<RentalOptionDto>>>),
> {
    match state.fleet_service.list_options().await {
        Ok(options) => Ok(Json(ApiResponse::success(
            options.into_iter().map(RentalOptionDto::from).collect(),
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/options/{id}",
    tag = "Rental Options",
    params(("id" = String, Path, description = "Option ID")),
    responses(
        (status = 200, description = "Option details", body = ApiResponse<RentalOptionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_option(
    State(state): State<OptionHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RentalOptionDto>>, (StatusCode, Json<ApiResponse<RentalOptionDto>>)> {
    match state.fleet_service.get_option(&id).await {
        Ok(option) => Ok(Json(ApiResponse::success(RentalOptionDto::from(option)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/options",
    tag = "Rental Options",
    security(("bearer_auth" = [])),
    request_body = RentalOptionRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<RentalOptionDto>),
        (status = 400, description = "Invalid data"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_option(
    State(state): State<OptionHandlerState>,
    ValidatedJson(req): ValidatedJson<RentalOptionRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<RentalOptionDto>>),
    (StatusCode, Json<ApiResponse<RentalOptionDto>>),
> {
    match state
        .fleet_service
        .create_option(req.name, req.description, req.price_per_day)
        .await
    {
        Ok(option) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(RentalOptionDto::from(option))),
        )),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/options/{id}",
    tag = "Rental Options",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Option ID")),
    request_body = RentalOptionRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<RentalOptionDto>),
        (status = 404, description = "Not found"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn update_option(
    State(state): State<OptionHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RentalOptionRequest>,
) -> Result<Json<ApiResponse<RentalOptionDto>>, (StatusCode, Json<ApiResponse<RentalOptionDto>>)> {
    match state
        .fleet_service
        .update_option(&id, req.name, req.description, req.price_per_day)
        .await
    {
        Ok(option) => Ok(Json(ApiResponse::success(RentalOptionDto::from(option)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/options/{id}",
    tag = "Rental Options",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Option ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn delete_option(
    State(state): State<OptionHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.fleet_service.delete_option(&id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(error_response(&e)),
    }
}
