//! Text extraction strategies.
//!
//! Every supported upload is turned into a single plain-text string:
//! - PDF: native text layer per page, OCR for pages without one
//! - Images: OCR of the whole image
//! - DOCX / XLSX / PPTX: document text in structural order
//!
//! Strategies are stateless; the only collaborators are the OCR engine and
//! the page rasterizer held by [`Extractor`].

pub mod format;
pub mod image;
pub mod office;
pub mod pdf;

#[cfg(test)]
pub(crate) mod fixtures;

use std::sync::Arc;

use thiserror::Error;

use crate::config::{OcrConfig, OCR_LANGUAGE};
use crate::ocr::{OcrEngine, OcrError, PageRasterizer, PdftoppmRasterizer, TesseractEngine};

pub use format::{classify_image, classify_office, classify_pdf, DocumentFormat};

/// Failure of a single extraction call.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Pdf(#[from] lopdf::Error),

    #[error("{0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("{0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("package part not found: {0}")]
    MissingPart(String),

    #[error("{0}")]
    Image(#[from] ::image::ImageError),

    #[error("{0}")]
    Ocr(#[from] OcrError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Dispatches a classified upload to its strategy.
#[derive(Clone)]
pub struct Extractor {
    ocr: Arc<dyn OcrEngine>,
    rasterizer: Arc<dyn PageRasterizer>,
}

impl Extractor {
    pub fn new(ocr: Arc<dyn OcrEngine>, rasterizer: Arc<dyn PageRasterizer>) -> Self {
        Self { ocr, rasterizer }
    }

    /// Build an extractor backed by the Tesseract and pdftoppm executables.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(
            Arc::new(TesseractEngine::new(&config.tesseract_cmd, OCR_LANGUAGE)),
            Arc::new(PdftoppmRasterizer::new(&config.pdftoppm_cmd)),
        )
    }

    /// Run the strategy for `format` over `bytes`.
    ///
    /// This blocks on external processes and should be called from a
    /// blocking context.
    pub fn extract(&self, format: DocumentFormat, bytes: &[u8]) -> ExtractResult<String> {
        match format {
            DocumentFormat::Pdf => {
                pdf::extract_pdf(bytes, self.rasterizer.as_ref(), self.ocr.as_ref())
            }
            DocumentFormat::Image => image::extract_image(bytes, self.ocr.as_ref()),
            DocumentFormat::Docx => office::docx::extract_docx(bytes),
            DocumentFormat::Xlsx => office::xlsx::extract_xlsx(bytes),
            DocumentFormat::Pptx => office::pptx::extract_pptx(bytes),
        }
    }
}
