//! Whitespace normalization for extracted text.

use std::sync::OnceLock;

use regex::Regex;

fn space_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").expect("valid space-run pattern"))
}

fn newline_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("valid newline-run pattern"))
}

/// Collapse whitespace in raw extracted text.
///
/// Runs of spaces become one space, runs of newlines become a single blank
/// line, and the result is trimmed. Formatting is idempotent.
pub fn format_text(raw: &str) -> String {
    let text = space_runs().replace_all(raw, " ");
    let text = newline_runs().replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(format_text("Hello    world  again"), "Hello world again");
    }

    #[test]
    fn test_collapses_blank_lines_to_paragraph_break() {
        assert_eq!(format_text("one\n\n\n\ntwo\nthree"), "one\n\ntwo\nthree");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(format_text("  \n\n padded \n\n"), "padded");
    }

    #[test]
    fn test_empty_input_is_empty() {
        assert_eq!(format_text(""), "");
        assert_eq!(format_text("   \n\n\n  "), "");
    }

    #[test]
    fn test_tabs_are_left_alone() {
        assert_eq!(format_text("a\t\tb"), "a\t\tb");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "  leading and trailing  ",
            "a  b   c\n\n\n\nd",
            "\n\n\n  x  \n \n\n y\t \n\n\n",
            "Résumé   — naïve\n\n\n\n\ncafé",
            " \n \n \n ",
            "line\r\n\r\n\r\nline",
        ];
        for sample in samples {
            let once = format_text(sample);
            assert_eq!(format_text(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
