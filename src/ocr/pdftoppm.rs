//! Page rasterization via Poppler's `pdftoppm`.

use std::io::Write;
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use super::{handle_cmd_output, OcrError, PageRasterizer};

#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    command: String,
}

impl PdftoppmRasterizer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf: &[u8], page: u32, dpi: u32) -> Result<Vec<u8>, OcrError> {
        let work_dir = TempDir::new()?;
        let input = work_dir.path().join("input.pdf");
        let prefix = work_dir.path().join("page");

        let mut file = std::fs::File::create(&input)?;
        file.write_all(pdf)?;
        file.flush()?;

        let page_str = page.to_string();
        let dpi_str = dpi.to_string();
        debug!(command = %self.command, page, dpi, "Rasterizing PDF page");

        // -singlefile writes exactly <prefix>.png instead of <prefix>-NN.png
        let output = Command::new(&self.command)
            .args(["-png", "-singlefile", "-r", &dpi_str, "-f", &page_str, "-l", &page_str])
            .arg(&input)
            .arg(&prefix)
            .output();
        handle_cmd_output(output, &self.command)?;

        let image_path = prefix.with_extension("png");
        if !image_path.exists() {
            return Err(OcrError::Failed(format!("no image generated for page {}", page)));
        }
        Ok(std::fs::read(image_path)?)
    }
}
