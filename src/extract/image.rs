//! Image OCR.

use std::io::Cursor;

use ::image::ImageFormat;
use tracing::debug;

use super::ExtractResult;
use crate::ocr::OcrEngine;

/// Decode the upload, normalize it to PNG and OCR it once.
///
/// No preprocessing is applied; the OCR engine's defaults decide the result.
pub fn extract_image(bytes: &[u8], ocr: &dyn OcrEngine) -> ExtractResult<String> {
    let image = ::image::load_from_memory(bytes)?;
    debug!(width = image.width(), height = image.height(), "Decoded image");

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let text = ocr.recognize(&png)?;
    Ok(text.trim().to_string())
}
