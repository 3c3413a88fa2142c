//! API error handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<jobboard_store::StoreError> for ApiError {
    fn from(err: jobboard_store::StoreError) -> Self {
        if err.is_read_only_fs() {
            return ApiError::Internal(
                "Storage is read-only in this environment. Use persistent storage or run locally."
                    .to_string(),
            );
        }
        tracing::error!(error = %err, "store operation failed");
        ApiError::Internal("Unable to save changes right now. Please try again.".to_string())
    }
}
