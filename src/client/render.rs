//! Terminal rendering of an analysis.

use std::fmt::Write;

use console::style;

use crate::analysis::{ResponseContract, MAX_ENGAGEMENT_SCORE};

/// Render either contract variant for the terminal.
pub fn render(contract: &ResponseContract) -> String {
    let mut out = String::new();

    if let Some(result) = contract.full() {
        let _ = writeln!(out, "{} {}", style("File:").bold(), result.filename);
        let _ = writeln!(
            out,
            "{} {}",
            style("Content type:").bold(),
            result.content_type.display_name()
        );
        let _ = writeln!(
            out,
            "{} {}/{}",
            style("Engagement score:").bold(),
            style(result.engagement_score.score).cyan(),
            MAX_ENGAGEMENT_SCORE
        );
        if !result.engagement_score.reason.is_empty() {
            let _ = writeln!(out, "  {}", style(&result.engagement_score.reason).dim());
        }
        if !result.analysis.is_empty() {
            let _ = writeln!(out, "\n{}\n{}", style("Analysis").bold(), result.analysis);
        }
        if !result.extracted_text_summary.is_empty() {
            let _ = writeln!(
                out,
                "\n{}\n{}",
                style("Summary").bold(),
                result.extracted_text_summary
            );
        }
        if !result.suggestions.message.is_empty() {
            let _ = writeln!(
                out,
                "\n{}\n{}",
                style("Suggestion").bold(),
                result.suggestions.message
            );
        }
        write_list(&mut out, "Actions", &result.suggestions.actions);
    }

    write_list(&mut out, "Hooks", contract.hooks());
    write_list(&mut out, "Call to action", contract.call_to_action());
    write_list(&mut out, "Hashtags", contract.hashtags());

    let text = contract.extracted_text();
    let _ = writeln!(out, "\n{}", style("Extracted text").bold());
    if text.is_empty() {
        let _ = writeln!(out, "{}", style("(no text found)").dim());
    } else {
        let _ = writeln!(out, "{}", text);
    }

    out
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", style(title).bold());
    for item in items {
        let _ = writeln!(out, "  {} {}", style("•").green(), item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, ContentType, MinimalResult};

    #[test]
    fn test_render_full_contract() {
        let mut result = AnalysisResult {
            filename: "cv.pdf".to_string(),
            content_type: ContentType::Resume,
            extracted_text: "Jane Doe".to_string(),
            ..Default::default()
        };
        result.engagement_score.score = 40;
        result.suggestions.hooks = vec!["Hire me".to_string()];

        let text = render(&ResponseContract::Full(result));

        assert!(text.contains("cv.pdf"));
        assert!(text.contains("Resume"));
        assert!(text.contains("Hire me"));
        assert!(text.contains("Jane Doe"));
    }

    #[test]
    fn test_render_minimal_contract() {
        let mut result = MinimalResult {
            extracted_text: String::new(),
            ..Default::default()
        };
        result.suggestions.hashtags = vec!["#rust".to_string()];

        let text = render(&ResponseContract::Minimal(result));

        assert!(text.contains("#rust"));
        assert!(text.contains("no text found"));
        assert!(!text.contains("Engagement score"));
    }
}
