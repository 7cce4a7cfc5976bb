//! Tesseract OCR engine.
//!
//! Uses Tesseract via command-line for text extraction from images.

use std::process::Command;

use super::extractor::{ExtractionError, OcrEngine};
use super::tools::{check_binary, handle_cmd_output, spill_to_tempfile};

/// Tesseract OCR backend.
#[derive(Debug, Default, Clone)]
pub struct TesseractBackend;

impl TesseractBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    pub fn availability_hint(&self) -> String {
        if self.is_available() {
            "Tesseract is available".to_string()
        } else {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        }
    }
}

impl OcrEngine for TesseractBackend {
    fn recognize(&self, image: &[u8], language: &str) -> Result<String, ExtractionError> {
        let file = spill_to_tempfile(image, ".img")?;

        let output = Command::new("tesseract")
            .arg(file.path())
            .arg("stdout")
            .args(["-l", language])
            .output();

        handle_cmd_output(output, "tesseract (install tesseract-ocr)", "tesseract failed")
    }
}
