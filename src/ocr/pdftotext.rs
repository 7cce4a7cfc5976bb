//! PDF text-layer extraction via Poppler's pdftotext.

use std::process::Command;

use super::extractor::{ExtractionError, PdfTextExtractor};
use super::tools::{check_binary, handle_cmd_output, spill_to_tempfile};

/// Extracts embedded text from PDFs with `pdftotext`.
#[derive(Debug, Default, Clone)]
pub struct PdfToText;

impl PdfToText {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available(&self) -> bool {
        check_binary("pdftotext")
    }

    pub fn availability_hint(&self) -> String {
        if self.is_available() {
            "pdftotext is available".to_string()
        } else {
            "pdftotext not installed. Install with: apt install poppler-utils".to_string()
        }
    }
}

impl PdfTextExtractor for PdfToText {
    fn extract_text(&self, pdf: &[u8]) -> Result<String, ExtractionError> {
        // Nothing to parse; an empty upload has an empty text layer.
        if pdf.is_empty() {
            return Ok(String::new());
        }

        let file = spill_to_tempfile(pdf, ".pdf")?;

        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8"])
            .arg(file.path())
            .arg("-") // Output to stdout
            .output();

        handle_cmd_output(output, "pdftotext (install poppler-utils)", "pdftotext failed")
    }
}
