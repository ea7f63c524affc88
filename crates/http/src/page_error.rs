//! Error type for HTML handlers.
//!
//! Same classification as [`crate::api_error::ApiError`] but renders a small
//! HTML page. Internal failures never reach the client.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use health_gauge_service::ServiceError;

use crate::views;

#[derive(Debug)]
pub enum PageError {
    /// 400, message is shown to the user.
    BadRequest(String),
    /// 404
    NotFound,
    /// 405, an override named a method the route does not accept.
    MethodNotAllowed,
    /// 500, details go to the log only.
    Internal(anyhow::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound => (StatusCode::NOT_FOUND, "Gauge not found".to_owned()),
            Self::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong".to_owned())
            },
        };
        (status, Html(views::error_page(status, &message))).into_response()
    }
}

impl From<ServiceError> for PageError {
    fn from(err: ServiceError) -> Self {
        if err.is_not_found() {
            return Self::NotFound;
        }
        match err {
            ServiceError::Validation(fields) => Self::BadRequest(
                fields.into_iter().map(|f| f.message).collect::<Vec<_>>().join(", "),
            ),
            _ => Self::Internal(err.into()),
        }
    }
}
