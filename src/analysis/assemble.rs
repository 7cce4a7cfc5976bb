//! Merge of normalized analysis with extraction metadata.

use super::types::AnalysisResult;

/// Default length, in characters, of the fallback summary.
pub const DEFAULT_SUMMARY_CHARS: usize = 200;

/// First `max_chars` characters of `text` (UTF-8 safe).
pub fn summarize(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Produce the final response contract.
///
/// The filename and extracted text are authoritative and replace whatever the
/// model echoed. An empty summary falls back to the start of the text.
pub fn assemble(
    mut normalized: AnalysisResult,
    filename: &str,
    extracted_text: &str,
    summary_chars: usize,
) -> AnalysisResult {
    normalized.filename = filename.to_string();
    normalized.extracted_text = extracted_text.to_string();
    if normalized.extracted_text_summary.is_empty() {
        normalized.extracted_text_summary = summarize(extracted_text, summary_chars).to_string();
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ContentType;

    #[test]
    fn test_summarize_respects_char_boundaries() {
        assert_eq!(summarize("héllo wörld", 4), "héll");
        assert_eq!(summarize("short", 200), "short");
        assert_eq!(summarize("", 200), "");
        assert_eq!(summarize("abc", 0), "");
    }

    #[test]
    fn test_fallback_summary_is_bounded() {
        let text = "ü".repeat(500);
        let result = assemble(AnalysisResult::default(), "a.pdf", &text, DEFAULT_SUMMARY_CHARS);
        assert_eq!(result.extracted_text_summary.chars().count(), DEFAULT_SUMMARY_CHARS);
        assert_eq!(result.extracted_text, text);
    }

    #[test]
    fn test_model_summary_is_kept() {
        let normalized = AnalysisResult {
            extracted_text_summary: "A resume".to_string(),
            content_type: ContentType::Resume,
            ..AnalysisResult::default()
        };
        let result = assemble(normalized, "cv.pdf", "Jane Doe\n\nEngineer", 200);
        assert_eq!(result.extracted_text_summary, "A resume");
        assert_eq!(result.filename, "cv.pdf");
        assert_eq!(result.content_type, ContentType::Resume);
    }

    #[test]
    fn test_echoed_text_is_overwritten() {
        let normalized = AnalysisResult {
            extracted_text: "hallucinated".to_string(),
            filename: "other.png".to_string(),
            ..AnalysisResult::default()
        };
        let result = assemble(normalized, "real.png", "real text", 200);
        assert_eq!(result.extracted_text, "real text");
        assert_eq!(result.filename, "real.png");
        assert_eq!(result.extracted_text_summary, "real text");
    }
}
