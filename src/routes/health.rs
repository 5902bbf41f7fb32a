use axum::{routing::get, Json, Router};

use crate::models::HealthResponse;

pub fn router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Static liveness; no dependency checks.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
