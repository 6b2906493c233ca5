//! Liveness endpoint for load balancers and orchestrators.

use axum::http::StatusCode;

/// GET /health
///
/// Reports process liveness only; the log store is not contacted.
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
