// Doc Extractor - plain text from PDF, image and Office uploads

pub mod config;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod routes;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
