//! Settings HTTP handlers
//!
//! The read side is public so the storefront can pick up the display
//! currency without a login; writes sit behind the admin layer.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use super::dto::{SettingsDto, UpdateSettingsRequest};
use crate::domain::{AppSettings, RepositoryProvider};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};

/// Application state for settings handlers.
#[derive(Clone)]
pub struct SettingsHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Current settings", body = ApiResponse<SettingsDto>)
    )
)]
pub async fn get_settings(
    State(state): State<SettingsHandlerState>,
) -> Result<Json<ApiResponse<SettingsDto>>, (StatusCode, Json<ApiResponse<SettingsDto>>)> {
    match state.repos.settings().get().await {
        Ok(settings) => Ok(Json(ApiResponse::success(SettingsDto::from(settings)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/settings",
    tag = "Settings",
    security(("bearer_auth" = [])),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings updated", body = ApiResponse<SettingsDto>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn update_settings(
    State(state): State<SettingsHandlerState>,
    ValidatedJson(req): ValidatedJson<UpdateSettingsRequest>,
) -> Result<Json<ApiResponse<SettingsDto>>, (StatusCode, Json<ApiResponse<SettingsDto>>)> {
    let settings = AppSettings {
        currency: req.currency,
        contact_email: req.contact_email,
        contact_phone: req.contact_phone,
        maintenance_mode: req.maintenance_mode,
        updated_at: Utc::now(),
    };

    match state.repos.settings().update(settings).await {
        Ok(saved) => Ok(Json(ApiResponse::success(SettingsDto::from(saved)))),
        Err(e) => Err(error_response(&e)),
    }
}
