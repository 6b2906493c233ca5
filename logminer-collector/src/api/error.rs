//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::repository::StoreError;
use crate::service::log_service::IngestError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Request refused before reaching validation (wrong content type,
    /// unreadable body); keeps the extractor's own status
    Rejected(StatusCode, String),
    StorageError(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Rejected(status, msg) => {
                tracing::debug!("Rejected request ({}): {}", status, msg);
                (status, msg)
            }
            ApiError::StorageError(err) => {
                tracing::error!("Error uploading log: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to upload log".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::ValidationError(msg) => ApiError::BadRequest(msg),
            IngestError::StorageError(err) => ApiError::StorageError(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                ApiError::BadRequest(rejection.body_text())
            }
            other => ApiError::Rejected(other.status(), other.body_text()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
