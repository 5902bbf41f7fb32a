//! Upload classification by declared filename or content-type.
//!
//! Classification never looks at the bytes; a lying filename is caught later
//! by the parsing library.

use std::fmt;

use super::{ExtractError, ExtractResult};

/// Content types accepted by the image endpoint.
pub const IMAGE_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/jpg",
    "image/gif",
    "image/webp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Image,
    Docx,
    Xlsx,
    Pptx,
}

impl DocumentFormat {
    /// Label used in processing error messages.
    pub fn pipeline(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Image => "image",
            DocumentFormat::Docx | DocumentFormat::Xlsx | DocumentFormat::Pptx => "office file",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Image => write!(f, "image"),
            DocumentFormat::Docx => write!(f, "docx"),
            DocumentFormat::Xlsx => write!(f, "xlsx"),
            DocumentFormat::Pptx => write!(f, "pptx"),
        }
    }
}

/// Accept any filename ending in `.pdf`, ignoring case.
pub fn classify_pdf(filename: &str) -> ExtractResult<DocumentFormat> {
    if filename.to_lowercase().ends_with(".pdf") {
        Ok(DocumentFormat::Pdf)
    } else {
        Err(ExtractError::UnsupportedFormat(filename.to_string()))
    }
}

/// Exact match against [`IMAGE_CONTENT_TYPES`].
pub fn classify_image(content_type: &str) -> ExtractResult<DocumentFormat> {
    if IMAGE_CONTENT_TYPES.contains(&content_type) {
        Ok(DocumentFormat::Image)
    } else {
        Err(ExtractError::UnsupportedFormat(content_type.to_string()))
    }
}

/// Dispatch on the lowercased text after the final `.` of the filename.
pub fn classify_office(filename: &str) -> ExtractResult<DocumentFormat> {
    // A name without a dot is its own extension.
    let extension = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match extension.as_str() {
        "docx" => Ok(DocumentFormat::Docx),
        "xlsx" => Ok(DocumentFormat::Xlsx),
        "pptx" => Ok(DocumentFormat::Pptx),
        _ => Err(ExtractError::UnsupportedFormat(filename.to_string())),
    }
}
