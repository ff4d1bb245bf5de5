//! Notification feed HTTP handlers
//!
//! Every endpoint is scoped to the authenticated user; there is no way to
//! read or flip another user's feed.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    ListNotificationsParams, MarkAllReadResponse, NotificationDto, UnreadCountResponse,
};
use crate::domain::notification::NotificationQuery;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{error_response, ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

/// Application state for notification handlers.
#[derive(Clone)]
pub struct NotificationHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(ListNotificationsParams),
    responses(
        (status = 200, description = "Own notification feed, newest first", body = PaginatedResponse<NotificationDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_notifications(
    State(state): State<NotificationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Query(params): Query<ListNotificationsParams>,
) -> Result<Json<PaginatedResponse<NotificationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    let paging = PaginationParams::clamped(params.page, params.limit);
    let query = NotificationQuery {
        user_id: user.user_id.clone(),
        unread_only: params.unread_only,
        page: paging.page,
        limit: paging.limit,
    };

    match state.repos.notifications().find_for_user(&query).await {
        Ok(result) => Ok(Json(PaginatedResponse::from_result(
            result,
            NotificationDto::from,
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread badge counter", body = ApiResponse<UnreadCountResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn unread_count(
    State(state): State<NotificationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
) -> Result<
    Json<ApiResponse<UnreadCountResponse>>,
    (StatusCode, Json<ApiResponse<UnreadCountResponse>>),
> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    match state.repos.notifications().unread_count(&user.user_id).await {
        Ok(count) => Ok(Json(ApiResponse::success(UnreadCountResponse { count }))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked read"),
        (status = 404, description = "Not found in the caller's feed")
    )
)]
pub async fn mark_read(
    State(state): State<NotificationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    match state
        .repos
        .notifications()
        .mark_read(&id, &user.user_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/read-all",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Whole feed marked read", body = ApiResponse<MarkAllReadResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn mark_all_read(
    State(state): State<NotificationHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
) -> Result<
    Json<ApiResponse<MarkAllReadResponse>>,
    (StatusCode, Json<ApiResponse<MarkAllReadResponse>>),
> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    match state.repos.notifications().mark_all_read(&user.user_id).await {
        Ok(updated) => Ok(Json(ApiResponse::success(MarkAllReadResponse { updated }))),
        Err(e) => Err(error_response(&e)),
    }
}
