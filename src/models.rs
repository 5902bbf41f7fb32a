use bytes::Bytes;

use crate::config::Config;
use crate::extract::Extractor;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Extractor,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let extractor = Extractor::from_config(&config.ocr);
        Self { config, extractor }
    }
}

/// A multipart upload held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or_default()
    }

    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
