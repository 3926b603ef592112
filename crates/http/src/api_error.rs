//! Typed API error for HTTP handlers.
//!
//! Converts service errors into proper HTTP responses with JSON body and
//! status codes: validation errors, not-found conditions, and upstream
//! failures each get their own class instead of the catch-all the gateway
//! used to surface.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crownwatch_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Use via `Result<Json<T>, ApiError>` in handlers.
/// Converts to JSON response: `{"error": "message"}`.
///
/// `BadGateway` and `Internal` log the real error server-side and return a
/// static message to the client — no upstream detail leakage.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input from caller.
    BadRequest(String),
    /// 404 Not Found — no image or crowns for the requested date.
    NotFound(String),
    /// 502 Bad Gateway — a remote backend failed. Details logged, not exposed.
    BadGateway(ServiceError),
    /// 500 Internal Server Error — unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl ApiError {
    /// Shared message for routes that require a `date` query parameter.
    #[must_use]
    pub fn missing_date() -> Self {
        Self::BadRequest("Date parameter is required".to_owned())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadGateway(err) => {
                tracing::error!(error = %err, "upstream service error");
                (StatusCode::BAD_GATEWAY, "upstream service error".to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

/// A malformed or incomplete request body is caller error, so it follows the
/// same 400 `{"error": ...}` contract as every other invalid input instead of
/// axum's plain-text rejection.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            e if e.is_upstream() => Self::BadGateway(e),
            e => Self::Internal(e.into()),
        }
    }
}
