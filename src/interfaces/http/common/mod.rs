//! Shared HTTP response envelopes and extractors

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::PaginatedResult;

/// Standard API response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Paginated API response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            success: true,
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn from_result<S>(result: PaginatedResult<S>, f: impl FnMut(S) -> T) -> Self {
        let result = result.map(f);
        Self {
            success: true,
            data: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Map a domain error to the HTTP status + envelope every handler returns.
pub fn error_response<T>(e: &DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error() {
        let body = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "ok");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn error_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "boom");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn paginated_envelope_from_result() {
        let result = PaginatedResult::new(vec![1, 2, 3], 7, 1, 3);
        let resp = PaginatedResponse::from_result(result, |n| n * 10);
        assert_eq!(resp.data, vec![10, 20, 30]);
        assert_eq!(resp.total, 7);
        assert_eq!(resp.total_pages, 3);
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let (status, _) = error_response::<()>(&DomainError::Validation("bad".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response::<()>(&DomainError::NotFound {
            entity: "Vehicle",
            field: "id",
            value: "veh-1".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response::<()>(&DomainError::InvalidTransition {
            from: "completed",
            to: "cancelled",
        });
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response::<()>(&DomainError::Forbidden("no".into()));
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
