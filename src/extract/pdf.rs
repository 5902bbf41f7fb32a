//! PDF text extraction with per-page OCR fallback.

use lopdf::Document;
use tracing::debug;

use super::ExtractResult;
use crate::config::RASTER_DPI;
use crate::ocr::{OcrEngine, PageRasterizer};

/// Where a page's text comes from.
#[derive(Debug, PartialEq, Eq)]
enum PageFragment {
    /// Machine-readable text embedded in the page.
    TextLayer(String),
    /// No usable text layer; the page must be rasterized and OCR'd.
    Scanned,
}

/// Extract every page in document order, joined by newlines and trimmed.
///
/// Pages are handled independently: a scanned page between two text pages
/// is OCR'd on its own while its siblings keep their text layer. Any parse,
/// rasterization or OCR failure aborts the whole document.
pub fn extract_pdf(
    bytes: &[u8],
    rasterizer: &dyn PageRasterizer,
    ocr: &dyn OcrEngine,
) -> ExtractResult<String> {
    let document = Document::load_mem(bytes)?;
    let pages = document.get_pages();
    debug!(pages = pages.len(), "Loaded PDF");

    let mut blocks = Vec::with_capacity(pages.len());
    for &page_number in pages.keys() {
        let text = match text_layer(&document, page_number)? {
            PageFragment::TextLayer(text) => {
                debug!(page = page_number, "Using text layer");
                text
            }
            PageFragment::Scanned => {
                debug!(page = page_number, dpi = RASTER_DPI, "No text layer, running OCR");
                let image = rasterizer.rasterize(bytes, page_number, RASTER_DPI)?;
                ocr.recognize(&image)?
            }
        };
        blocks.push(text);
    }

    Ok(blocks.join("\n").trim().to_string())
}

fn text_layer(document: &Document, page_number: u32) -> ExtractResult<PageFragment> {
    classify_page(document.extract_text(&[page_number]))
}

/// Only a blank text layer means the page is scanned; a decode error is fatal.
fn classify_page(extracted: lopdf::Result<String>) -> ExtractResult<PageFragment> {
    let text = extracted?;
    if text.trim().is_empty() {
        Ok(PageFragment::Scanned)
    } else {
        Ok(PageFragment::TextLayer(text))
    }
}
