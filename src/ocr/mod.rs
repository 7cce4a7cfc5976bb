//! Text extraction from uploaded documents.
//!
//! Extracts text using:
//! - pdftotext (Poppler) for PDF text layers
//! - Tesseract OCR for image files
//!
//! Both are consumed through the [`PdfTextExtractor`] and [`OcrEngine`]
//! traits so tests and alternative deployments can substitute their own.

mod extractor;
mod format;
mod pdftotext;
mod tesseract;
mod tools;

pub use extractor::{ExtractionError, ExtractorDispatcher, MediaKind, OcrEngine, PdfTextExtractor};
pub use format::format_text;
pub use pdftotext::PdfToText;
pub use tesseract::TesseractBackend;
pub use tools::{check_binary, check_tools};
