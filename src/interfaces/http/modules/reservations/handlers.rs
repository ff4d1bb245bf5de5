//! Reservation HTTP handlers
//!
//! Creation and the own-listing run as the authenticated customer.
//! The full listing and confirm/complete sit behind the admin layer;
//! cancel is open to the owner as well.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateReservationRequest, ListReservationsParams, MyReservationsParams, ReservationDto,
};
use crate::application::booking::{self, BookingService};
use crate::domain::reservation::ReservationQuery;
use crate::domain::{DomainError, ReservationStatus};
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationHandlerState {
    pub booking_service: Arc<BookingService>,
}

/// Parse a status query value; unknown values are a client error rather
/// than the lenient fallback used for stored rows.
fn parse_status(s: &str) -> Result<ReservationStatus, DomainError> {
    match s {
        "pending" => Ok(ReservationStatus::Pending),
        "confirmed" => Ok(ReservationStatus::Confirmed),
        "completed" => Ok(ReservationStatus::Completed),
        "cancelled" => Ok(ReservationStatus::Cancelled),
        other => Err(DomainError::Validation(format!(
            "Unknown reservation status '{}'",
            other
        ))),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Vehicle not available for the requested dates")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ReservationDto>>),
    (StatusCode, Json<ApiResponse<ReservationDto>>),
> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    let payload = booking::CreateReservationRequest {
        vehicle_id: request.vehicle_id,
        start_date_time: request.start_date_time,
        end_date_time: request.end_date_time,
        pickup_location: request.pickup_location,
        return_location: request.return_location,
        with_driver: request.with_driver,
        selected_option_ids: request.selected_option_ids,
    };

    match state
        .booking_service
        .create_reservation(&user.user_id, payload)
        .await
    {
        Ok(reservation) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ReservationDto::from(reservation))),
        )),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(ListReservationsParams),
    responses(
        (status = 200, description = "All reservations", body = PaginatedResponse<ReservationDto>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationHandlerState>,
    Query(params): Query<ListReservationsParams>,
) -> Result<Json<PaginatedResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = match params.status.as_deref().map(parse_status).transpose() {
        Ok(s) => s,
        Err(e) => return Err(error_response(&e)),
    };

    let paging = PaginationParams::clamped(params.page, params.limit);
    let query = ReservationQuery {
        status,
        vehicle_id: params.vehicle_id,
        customer_id: params.customer_id,
        page: paging.page,
        limit: paging.limit,
    };

    match state.booking_service.list_reservations(&query).await {
        Ok(result) => Ok(Json(PaginatedResponse::from_result(
            result,
            ReservationDto::from,
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/my",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(MyReservationsParams),
    responses(
        (status = 200, description = "Own reservations", body = PaginatedResponse<ReservationDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_reservations(
    State(state): State<ReservationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Query(params): Query<MyReservationsParams>,
) -> Result<Json<PaginatedResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    let status = match params.status.as_deref().map(parse_status).transpose() {
        Ok(s) => s,
        Err(e) => return Err(error_response(&e)),
    };

    let paging = PaginationParams::clamped(params.page, params.limit);
    match state
        .booking_service
        .list_own(&user.user_id, status, paging.page, paging.limit)
        .await
    {
        Ok(result) => Ok(Json(PaginatedResponse::from_result(
            result,
            ReservationDto::from,
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    match state
        .booking_service
        .get_reservation(&id, &user.to_actor())
        .await
    {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from(reservation)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/confirm",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation confirmed", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Not confirmable from its current status")
    )
)]
pub async fn confirm_reservation(
    State(state): State<ReservationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    match state.booking_service.confirm(&id, &user.to_actor()).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from(reservation)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/complete",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation completed", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Not completable from its current status")
    )
)]
pub async fn complete_reservation(
    State(state): State<ReservationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    match state.booking_service.complete(&id, &user.to_actor()).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from(reservation)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Already in a terminal status")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    match state.booking_service.cancel(&id, &user.to_actor()).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from(reservation)))),
        Err(e) => Err(error_response(&e)),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse() {
        assert_eq!(parse_status("pending").unwrap(), ReservationStatus::Pending);
        assert_eq!(
            parse_status("completed").unwrap(),
            ReservationStatus::Completed
        );
    }

    #[test]
    fn unknown_status_is_a_client_error() {
        let err = parse_status("archived").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
