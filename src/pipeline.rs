//! The request-scoped extraction and analysis pipeline.
//!
//! One [`UploadedAsset`] yields one extracted text yields one
//! [`AnalysisResult`]. Extraction finishes before the model is called, and
//! nothing is shared between requests beyond the capability handles.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use crate::analysis::{assemble, AnalysisResult, Analyzer, Diagnostics};
use crate::config::Config;
use crate::llm::{LlmClient, LlmError};
use crate::ocr::{ExtractionError, ExtractorDispatcher, PdfToText, TesseractBackend};

/// An uploaded document, alive for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub payload: Bytes,
    pub media_type: String,
    pub filename: String,
}

impl UploadedAsset {
    pub fn new(
        payload: impl Into<Bytes>,
        media_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            payload: payload.into(),
            media_type: media_type.into(),
            filename: filename.into(),
        }
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}

/// Extraction followed by analysis and assembly.
#[derive(Clone)]
pub struct Pipeline {
    extractor: ExtractorDispatcher,
    analyzer: Analyzer,
    summary_chars: usize,
}

impl Pipeline {
    pub fn new(extractor: ExtractorDispatcher, analyzer: Analyzer, summary_chars: usize) -> Self {
        Self {
            extractor,
            analyzer,
            summary_chars,
        }
    }

    /// Build the pipeline with the real capabilities named by the configuration.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let extractor = ExtractorDispatcher::new(
            Arc::new(PdfToText::new()),
            Arc::new(TesseractBackend::new()),
            config.extraction.ocr_language.clone(),
        );
        let client = LlmClient::new(config.llm.clone())?;
        let analyzer = Analyzer::new(Arc::new(client), config.llm.max_content_chars);

        Ok(Self::new(extractor, analyzer, config.analysis.summary_chars))
    }

    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        self.analyzer.diagnostics()
    }

    /// Process one asset into the response contract.
    ///
    /// Only extraction can fail; analysis failures degrade to default fields.
    pub async fn process(&self, asset: &UploadedAsset) -> Result<AnalysisResult, ExtractionError> {
        let text = self.extractor.extract(asset).await?;
        info!(
            "Extracted {} chars from {} ({})",
            text.chars().count(),
            asset.filename,
            asset.media_type
        );

        let normalized = self.analyzer.analyze(&text).await;
        Ok(assemble(normalized, &asset.filename, &text, self.summary_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ContentType;
    use crate::llm::AnalysisProvider;
    use crate::ocr::{OcrEngine, PdfTextExtractor};
    use async_trait::async_trait;

    struct EmptyPdf;

    impl PdfTextExtractor for EmptyPdf {
        fn extract_text(&self, pdf: &[u8]) -> Result<String, ExtractionError> {
            assert!(pdf.is_empty());
            Ok(String::new())
        }
    }

    struct NoOcr;

    impl OcrEngine for NoOcr {
        fn recognize(&self, _image: &[u8], _language: &str) -> Result<String, ExtractionError> {
            Err(ExtractionError::ToolNotFound("tesseract".to_string()))
        }
    }

    struct Down;

    #[async_trait]
    impl AnalysisProvider for Down {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Connection("provider unreachable".to_string()))
        }
    }

    fn pipeline() -> Pipeline {
        let extractor = ExtractorDispatcher::new(Arc::new(EmptyPdf), Arc::new(NoOcr), "eng");
        Pipeline::new(extractor, Analyzer::new(Arc::new(Down), 12000), 200)
    }

    #[tokio::test]
    async fn test_empty_pdf_with_failed_analysis_yields_defaults() {
        let asset = UploadedAsset::new(Bytes::new(), "application/pdf", "blank.pdf");

        let result = pipeline().process(&asset).await.unwrap();

        assert_eq!(result.filename, "blank.pdf");
        assert_eq!(result.extracted_text, "");
        assert_eq!(result.extracted_text_summary, "");
        assert_eq!(result.content_type, ContentType::Other);
        assert_eq!(result.engagement_score.score, 0);
        assert!(result.suggestions.hooks.is_empty());
    }

    #[tokio::test]
    async fn test_extraction_failure_is_fatal() {
        let asset = UploadedAsset::new(Bytes::from_static(b"\x89PNG"), "image/png", "a.png");

        let err = pipeline().process(&asset).await.unwrap_err();

        assert!(matches!(err, ExtractionError::ToolNotFound(_)));
    }
}
