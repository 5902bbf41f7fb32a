// Error types for the HTTP boundary

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::models::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rejected from filename/content-type alone, before any parsing.
    #[error("{0}")]
    InvalidFormat(String),

    #[error("Field '{0}' is required")]
    MissingField(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A parsing or OCR library failed while extracting.
    #[error("Error processing {pipeline}: {message}")]
    Processing {
        pipeline: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn processing(pipeline: &'static str, message: impl Into<String>) -> Self {
        AppError::Processing {
            pipeline,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFormat(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Processing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
