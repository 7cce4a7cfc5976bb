//! Routing of uploaded assets to the PDF text extractor or the OCR engine.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::format::format_text;
use crate::pipeline::UploadedAsset;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Which capability handles a declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Image,
}

impl MediaKind {
    /// Classify a declared media type. Parameters such as `; charset=...` are ignored.
    pub fn classify(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/pdf" {
            Some(Self::Pdf)
        } else if essence.starts_with("image/") {
            Some(Self::Image)
        } else {
            None
        }
    }
}

/// Extracts the text layer of a PDF.
pub trait PdfTextExtractor: Send + Sync {
    fn extract_text(&self, pdf: &[u8]) -> Result<String, ExtractionError>;
}

/// Recognizes text in an image.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &[u8], language: &str) -> Result<String, ExtractionError>;
}

/// Routes an asset to the right capability and formats what comes back.
#[derive(Clone)]
pub struct ExtractorDispatcher {
    pdf: Arc<dyn PdfTextExtractor>,
    ocr: Arc<dyn OcrEngine>,
    language: String,
}

impl ExtractorDispatcher {
    pub fn new(
        pdf: Arc<dyn PdfTextExtractor>,
        ocr: Arc<dyn OcrEngine>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            pdf,
            ocr,
            language: language.into(),
        }
    }

    /// Extract and format the text of an asset.
    ///
    /// Unsupported media types are rejected before any capability is invoked.
    /// Capability failures are returned as-is and never retried.
    pub async fn extract(&self, asset: &UploadedAsset) -> Result<String, ExtractionError> {
        let kind = MediaKind::classify(&asset.media_type)
            .ok_or_else(|| ExtractionError::UnsupportedMediaType(asset.media_type.clone()))?;

        debug!(
            "Extracting {} ({}, {} bytes) via {:?}",
            asset.filename,
            asset.media_type,
            asset.size(),
            kind
        );

        let payload = asset.payload.clone();
        let raw = match kind {
            MediaKind::Pdf => {
                let pdf = Arc::clone(&self.pdf);
                tokio::task::spawn_blocking(move || pdf.extract_text(&payload)).await??
            }
            MediaKind::Image => {
                let ocr = Arc::clone(&self.ocr);
                let language = self.language.clone();
                tokio::task::spawn_blocking(move || ocr.recognize(&payload, &language)).await??
            }
        };

        Ok(format_text(&raw))
    }
}
