//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/health` - Liveness check
//! - `/extract/pdf` - PDF text layer with OCR fallback
//! - `/extract/image` - Image OCR
//! - `/extract/office` - DOCX, XLSX and PPTX text

pub mod extract;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
///
/// Uploads are read whole into memory; the framework's default body limit is
/// disabled so no size cap applies.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(health::router())
        .merge(extract::router(state))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    layer.allow_origin(parsed)
}
