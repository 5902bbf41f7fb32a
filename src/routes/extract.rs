//! Extraction endpoints.
//!
//! Each handler reads the multipart `file` field into memory, classifies it
//! from its declared name or content-type, and runs exactly one strategy on
//! the blocking pool.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use crate::extract::{classify_image, classify_office, classify_pdf, DocumentFormat};
use crate::models::{AppState, ExtractResponse, UploadedFile};
use crate::types::{AppError, AppResult};

const UPLOAD_FIELD: &str = "file";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/extract/pdf", post(extract_pdf))
        .route("/extract/image", post(extract_image))
        .route("/extract/office", post(extract_office))
        .with_state(state)
}

async fn extract_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ExtractResponse>> {
    let upload = read_upload(multipart).await?;
    info!(
        filename = %upload.filename(),
        bytes = upload.data.len(),
        "PDF extraction request received"
    );

    let format = classify_pdf(upload.filename())
        .map_err(|_| AppError::InvalidFormat("Invalid file format, expected PDF".to_string()))?;
    run_extraction(&state, format, upload).await
}

async fn extract_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ExtractResponse>> {
    let upload = read_upload(multipart).await?;
    info!(
        filename = %upload.filename(),
        content_type = %upload.content_type(),
        bytes = upload.data.len(),
        "Image extraction request received"
    );

    let format = classify_image(upload.content_type())
        .map_err(|_| AppError::InvalidFormat("Invalid image format".to_string()))?;
    run_extraction(&state, format, upload).await
}

async fn extract_office(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ExtractResponse>> {
    let upload = read_upload(multipart).await?;
    info!(
        filename = %upload.filename(),
        bytes = upload.data.len(),
        "Office extraction request received"
    );

    let format = classify_office(upload.filename())
        .map_err(|_| AppError::InvalidFormat("Unsupported office format".to_string()))?;
    run_extraction(&state, format, upload).await
}

/// Pull the `file` field out of the form, buffering it completely.
async fn read_upload(mut multipart: Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    Err(AppError::MissingField(UPLOAD_FIELD.to_string()))
}

/// Run one strategy and fold any failure into a processing error.
async fn run_extraction(
    state: &AppState,
    format: DocumentFormat,
    upload: UploadedFile,
) -> AppResult<Json<ExtractResponse>> {
    let extractor = state.extractor.clone();
    let data = upload.data;

    let outcome = tokio::task::spawn_blocking(move || {
        extractor
            .extract(format, &data)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| e.to_string())
    .and_then(|result| result);

    match outcome {
        Ok(text) => {
            let text = text.trim().to_string();
            info!(%format, bytes = text.len(), "Extraction finished");
            Ok(Json(ExtractResponse { text }))
        }
        Err(message) => {
            warn!(%format, error = %message, "Extraction failed");
            Err(AppError::processing(format.pipeline(), message))
        }
    }
}
