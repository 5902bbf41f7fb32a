//! Tesseract OCR via the command-line executable.

use std::io::Write;
use std::process::Command;

use tracing::debug;

use super::{handle_cmd_output, OcrEngine, OcrError};

/// Runs `<cmd> <image> stdout -l <language>` for each recognition.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: String,
    language: String,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, png: &[u8]) -> Result<String, OcrError> {
        let mut image = tempfile::Builder::new().suffix(".png").tempfile()?;
        image.write_all(png)?;
        image.flush()?;

        debug!(
            command = %self.command,
            language = %self.language,
            bytes = png.len(),
            "Running tesseract"
        );

        let output = Command::new(&self.command)
            .arg(image.path())
            .arg("stdout")
            .args(["-l", &self.language])
            .output();
        let stdout = handle_cmd_output(output, &self.command)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}
