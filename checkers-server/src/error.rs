//! API error responses
//!
//! Errors render as `{"detail": "<message>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use checkers_core::BoardError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request was understood but rejected
    #[error("{0}")]
    BadRequest(String),

    /// The engine failed while handling a valid request
    #[error("{0}")]
    Internal(String),
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Unreadable request bodies get the same `{"detail"}` shape as other
/// client errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
