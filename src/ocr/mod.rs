//! OCR collaborators.
//!
//! Both pieces shell out to well-known executables:
//! - Tesseract for optical character recognition
//! - pdftoppm (Poppler) for rasterizing PDF pages
//!
//! They sit behind small traits so the extraction strategies can be driven
//! with in-process fakes in tests.

mod pdftoppm;
mod tesseract;

pub use pdftoppm::PdftoppmRasterizer;
pub use tesseract::TesseractEngine;

use std::process::Output;
use thiserror::Error;

/// Errors raised by the OCR engine or the rasterizer.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("{0} not found")]
    ToolNotFound(String),

    #[error("{0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts a rasterized image into text.
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in a PNG-encoded image.
    fn recognize(&self, png: &[u8]) -> Result<String, OcrError>;
}

/// Renders a single PDF page to an image.
pub trait PageRasterizer: Send + Sync {
    /// Render `page` (1-based) of `pdf` at `dpi` and return PNG bytes.
    fn rasterize(&self, pdf: &[u8], page: u32, dpi: u32) -> Result<Vec<u8>, OcrError>;
}

/// Map the result of spawning an external tool to stdout or an `OcrError`.
pub(crate) fn handle_cmd_output(
    result: std::io::Result<Output>,
    tool: &str,
) -> Result<Vec<u8>, OcrError> {
    match result {
        Ok(output) if output.status.success() => Ok(output.stdout),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(OcrError::Failed(format!("{} failed: {}", tool, stderr.trim())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(OcrError::ToolNotFound(tool.to_string()))
        }
        Err(e) => Err(OcrError::Io(e)),
    }
}
