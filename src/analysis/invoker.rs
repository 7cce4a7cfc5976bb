//! Prompting the model and absorbing its failures.

use std::sync::Arc;

use tracing::debug;

use super::diagnostics::Diagnostics;
use super::normalize::normalize;
use super::types::AnalysisResult;
use crate::llm::{analysis_prompt, AnalysisProvider};

/// Runs one analysis call per extracted text and always yields a result.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn AnalysisProvider>,
    diagnostics: Arc<Diagnostics>,
    max_content_chars: usize,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn AnalysisProvider>, max_content_chars: usize) -> Self {
        Self {
            provider,
            diagnostics: Arc::new(Diagnostics::new()),
            max_content_chars,
        }
    }

    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.diagnostics
    }

    /// Build the prompt for a piece of extracted text.
    pub fn build_prompt(&self, text: &str) -> String {
        analysis_prompt(truncate_content(text, self.max_content_chars))
    }

    /// Analyze extracted text.
    ///
    /// The model is called at most once. A failed call or unparseable answer
    /// is recorded in diagnostics and yields the all-defaults result.
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        self.diagnostics.record_analysis();
        let prompt = self.build_prompt(text);

        let outcome = self.provider.generate(&prompt).await;
        if let Ok(raw) = &outcome {
            debug!("Model returned {} chars", raw.len());
        }

        let normalized = normalize(outcome.as_deref());
        if let Some(failure) = normalized.fallback {
            self.diagnostics.record_fallback(failure.kind, failure.cause);
        }
        normalized.result
    }
}

/// Truncate content to a maximum byte length (UTF-8 safe).
fn truncate_content(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
