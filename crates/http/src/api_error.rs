//! Typed API error for JSON handlers.
//!
//! Converts service errors into HTTP responses with a JSON body and status code.
//! Handlers return `Result<Json<T>, ApiError>` instead of bare `StatusCode`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use health_gauge_core::FieldError;
use health_gauge_service::ServiceError;
use health_gauge_storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to `{"error": "message"}`, plus `"fields"` for validation failures.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: malformed query or path input.
    BadRequest(String),
    /// 404 Not Found: requested gauge doesn't exist.
    NotFound(String),
    /// 422 Unprocessable Entity: one or more fields failed validation.
    Validation(Vec<FieldError>),
    /// 500 Internal Server Error: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::json!({"error": msg})),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({"error": msg})),
            Self::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({"error": "validation failed", "fields": fields}),
            ),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({"error": "internal server error"}),
                )
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(fields) => Self::Validation(fields),
            ServiceError::Storage(StorageError::NotFound { entity, id }) => {
                Self::NotFound(format!("{entity} '{id}' not found"))
            },
            _ => Self::Internal(err.into()),
        }
    }
}
