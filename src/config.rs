use anyhow::Result;
use serde::Deserialize;
use std::env;

/// Language model passed to Tesseract for every OCR call.
pub const OCR_LANGUAGE: &str = "eng";

/// Resolution used when rasterizing PDF pages that have no text layer.
pub const RASTER_DPI: u32 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

/// External executables used for OCR and page rasterization.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub tesseract_cmd: String,
    pub pdftoppm_cmd: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            pdftoppm_cmd: "pdftoppm".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = OcrConfig::default();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: parse_origins(
                    &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
            },
            ocr: OcrConfig {
                tesseract_cmd: env::var("TESSERACT_CMD").unwrap_or(defaults.tesseract_cmd),
                pdftoppm_cmd: env::var("PDFTOPPM_CMD").unwrap_or(defaults.pdftoppm_cmd),
            },
        })
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
