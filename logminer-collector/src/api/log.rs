//! Log API Handlers
//!
//! HTTP endpoints for log ingestion.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use logminer_core::dto::log::{UploadLog, UploadLogResponse};

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::log_service;

/// POST /logs/upload
/// Validate and store a single log submission
pub async fn upload_log(
    State(state): State<AppState>,
    payload: Result<Json<UploadLog>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UploadLogResponse>)> {
    let Json(req) = payload?;

    tracing::info!(
        "Uploading log for repo {:?} pipeline {:?}",
        req.repo.as_deref().unwrap_or_default(),
        req.pipeline_id.as_deref().unwrap_or_default()
    );

    let record = log_service::upload_log(state.store.as_ref(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadLogResponse::uploaded(record.id)),
    ))
}

/// GET /logs/github
/// Placeholder for pulling workflow logs from GitHub
pub async fn fetch_github_logs() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(serde_json::json!({ "message": "Not implemented yet" })),
    )
}
