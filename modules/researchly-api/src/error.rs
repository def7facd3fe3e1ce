use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;

use researchly_common::ResearchlyError;

/// Request-boundary error. Everything a handler can fail with maps to one of
/// three HTTP shapes.
#[derive(Debug)]
pub enum ApiError {
    /// 400 {"error": ...}
    BadRequest(String),
    /// 404 {"error": ...}
    NotFound(String),
    /// 500 {"error", "message", "timestamp"}
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn source_not_found() -> Self {
        ApiError::NotFound("Source not found".to_string())
    }
}

impl From<ResearchlyError> for ApiError {
    fn from(e: ResearchlyError) -> Self {
        match e {
            ResearchlyError::Validation(msg) => ApiError::BadRequest(msg),
            ResearchlyError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response(),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Internal server error",
                    "message": message,
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
                .into_response(),
        }
    }
}
