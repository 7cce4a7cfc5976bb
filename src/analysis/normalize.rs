//! Defensive reshaping of raw model output into a complete [`AnalysisResult`].
//!
//! Whatever the model returns (fenced JSON, partial JSON, prose, nothing),
//! [`normalize_value`] produces a record with every field populated.

use std::fmt::Display;

use serde_json::{Map, Value};

use super::diagnostics::{FailureRecord, FallbackKind};
use super::types::{AnalysisResult, ContentType, EngagementScore, Suggestions, MAX_ENGAGEMENT_SCORE};

/// Remove a surrounding Markdown code fence (optionally language-tagged) and trim.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string, e.g. "json" in "```json".
        let info_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        text = rest[info_len..].trim_start();
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text.trim()
}

/// Parse raw model output as a JSON value after stripping code fences.
pub fn parse_response(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fences(raw))
}

/// A normalized answer and, when defaults were substituted, why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub result: AnalysisResult,
    pub fallback: Option<FailureRecord>,
}

/// Normalize the outcome of one model call.
///
/// A failed call skips parsing. Unparseable output is treated as an empty
/// object. Either way the all-defaults result comes back with the cause.
pub fn normalize<E: Display>(outcome: Result<&str, E>) -> Normalized {
    let (kind, cause) = match outcome {
        Ok(raw) => match parse_response(raw) {
            Ok(value) => {
                return Normalized {
                    result: normalize_value(&value),
                    fallback: None,
                }
            }
            Err(e) => (FallbackKind::Unparseable, e.to_string()),
        },
        Err(e) => (FallbackKind::CallFailed, e.to_string()),
    };

    Normalized {
        result: AnalysisResult::default(),
        fallback: Some(FailureRecord { kind, cause }),
    }
}

/// Build a fully-defaulted result from a loosely-typed value.
///
/// Only fields of the expected shape are taken; everything else falls back to
/// its default. `filename` and `extractedText` are left empty for the
/// assembler to fill.
pub fn normalize_value(value: &Value) -> AnalysisResult {
    let empty = Map::new();
    let root = value.as_object().unwrap_or(&empty);

    let engagement = root.get("engagement_score").and_then(Value::as_object);
    let suggestions = root.get("suggestions").and_then(Value::as_object);

    AnalysisResult {
        filename: String::new(),
        content_type: root
            .get("content_type")
            .and_then(Value::as_str)
            .and_then(ContentType::from_label)
            .unwrap_or_default(),
        analysis: string_field(Some(root), "analysis"),
        extracted_text_summary: string_field(Some(root), "extracted_text_summary"),
        extracted_text: String::new(),
        engagement_score: EngagementScore {
            score: engagement
                .and_then(|e| e.get("score"))
                .and_then(score_value)
                .unwrap_or(0),
            reason: string_field(engagement, "reason"),
        },
        suggestions: Suggestions {
            message: string_field(suggestions, "message"),
            actions: string_list(suggestions, "actions"),
            hooks: string_list(suggestions, "hooks"),
            call_to_action: string_list(suggestions, "callToAction"),
            hashtags: string_list(suggestions, "hashtags"),
        },
    }
}

fn string_field(object: Option<&Map<String, Value>>, key: &str) -> String {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn string_list(object: Option<&Map<String, Value>>, key: &str) -> Vec<String> {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read a score from a number or numeric string, rounded and clamped to 0..=100.
fn score_value(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(0.0, MAX_ENGAGEMENT_SCORE as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Every schema key is present with a value of the right JSON type.
    fn assert_complete(result: &AnalysisResult) {
        let json = serde_json::to_value(result).unwrap();
        for key in ["filename", "analysis", "extracted_text_summary", "extractedText"] {
            assert!(json[key].is_string(), "{} should be a string", key);
        }
        assert!(json["content_type"].is_string());
        assert!(json["engagement_score"]["score"].is_u64());
        assert!(json["engagement_score"]["score"].as_u64().unwrap() <= 100);
        assert!(json["engagement_score"]["reason"].is_string());
        assert!(json["suggestions"]["message"].is_string());
        for key in ["actions", "hooks", "callToAction", "hashtags"] {
            assert!(json["suggestions"][key].is_array(), "{} should be a list", key);
        }
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```JSON {} ```"), "{}");
        assert_eq!(strip_code_fences(""), "");
    }

    #[test]
    fn test_fenced_partial_response_fills_defaults() {
        let result = normalize(Ok::<_, String>("```json\n{\"content_type\":\"quote\"}\n```")).result;

        assert_eq!(result.content_type, ContentType::Quote);
        assert_eq!(
            result,
            AnalysisResult {
                content_type: ContentType::Quote,
                ..AnalysisResult::default()
            }
        );
    }

    #[test]
    fn test_full_response_is_carried_through() {
        let raw = json!({
            "content_type": "social_post",
            "analysis": "Punchy opener",
            "extracted_text_summary": "Launch post",
            "engagement_score": { "score": 82, "reason": "Strong hook" },
            "suggestions": {
                "message": "Post in the morning",
                "actions": ["Add an image"],
                "hooks": ["You won't believe this"],
                "callToAction": ["Sign up today"],
                "hashtags": ["#launch", "#rust"]
            }
        })
        .to_string();

        let normalized = normalize(Ok::<_, String>(raw.as_str()));
        assert!(normalized.fallback.is_none());
        let result = normalized.result;

        assert_eq!(result.content_type, ContentType::SocialPost);
        assert_eq!(result.analysis, "Punchy opener");
        assert_eq!(result.extracted_text_summary, "Launch post");
        assert_eq!(result.engagement_score.score, 82);
        assert_eq!(result.engagement_score.reason, "Strong hook");
        assert_eq!(result.suggestions.message, "Post in the morning");
        assert_eq!(result.suggestions.actions, vec!["Add an image"]);
        assert_eq!(result.suggestions.hooks, vec!["You won't believe this"]);
        assert_eq!(result.suggestions.call_to_action, vec!["Sign up today"]);
        assert_eq!(result.suggestions.hashtags, vec!["#launch", "#rust"]);
    }

    #[test]
    fn test_call_failure_returns_defaults() {
        let normalized = normalize(Err::<&str, _>("quota exceeded"));

        assert_eq!(normalized.result, AnalysisResult::default());
        assert_eq!(
            normalized.fallback,
            Some(FailureRecord {
                kind: FallbackKind::CallFailed,
                cause: "quota exceeded".to_string(),
            })
        );
    }

    #[test]
    fn test_unparseable_answer_reports_kind() {
        let normalized = normalize(Ok::<_, String>("Sure! Here is my analysis."));

        assert_eq!(normalized.result, AnalysisResult::default());
        assert_eq!(
            normalized.fallback.map(|f| f.kind),
            Some(FallbackKind::Unparseable)
        );
    }

    #[test]
    fn test_malformed_inputs_always_complete() {
        let inputs = [
            "",
            "not json at all",
            "```json\n{broken\n```",
            "null",
            "[]",
            "42",
            "\"just a string\"",
            "{}",
            r#"{"content_type": null, "analysis": 7, "engagement_score": null}"#,
            r#"{"content_type": "meme", "engagement_score": {"score": "high"}}"#,
            r#"{"engagement_score": {"score": -5}, "suggestions": {"hooks": [1, null, "ok"]}}"#,
            r#"{"engagement_score": {"score": 1e9}}"#,
            r#"{"engagement_score": 50, "suggestions": "none"}"#,
            r#"{"suggestions": {"actions": null, "hashtags": {"a": 1}, "callToAction": [[]]}}"#,
        ];
        for input in inputs {
            assert_complete(&normalize(Ok::<_, String>(input)).result);
        }
        assert_complete(&normalize(Err::<&str, _>("timeout")).result);
    }

    #[test]
    fn test_wrong_shapes_fall_back_per_field() {
        let value = json!({
            "content_type": "MEME",
            "analysis": ["not", "a", "string"],
            "engagement_score": { "score": "71.6", "reason": 3 },
            "suggestions": { "hooks": [1, null, "kept"], "message": "hi" }
        });

        let result = normalize_value(&value);

        assert_eq!(result.content_type, ContentType::Other);
        assert_eq!(result.analysis, "");
        assert_eq!(result.engagement_score.score, 72);
        assert_eq!(result.engagement_score.reason, "");
        assert_eq!(result.suggestions.hooks, vec!["kept"]);
        assert_eq!(result.suggestions.message, "hi");
        assert!(result.suggestions.hashtags.is_empty());
    }

    #[test]
    fn test_score_is_clamped_and_rounded() {
        let score = |v: Value| score_value(&v);
        assert_eq!(score(json!(150)), Some(100));
        assert_eq!(score(json!(-3)), Some(0));
        assert_eq!(score(json!(49.5)), Some(50));
        assert_eq!(score(json!(" 12 ")), Some(12));
        assert_eq!(score(json!(true)), None);
        assert_eq!(score(json!(null)), None);
    }

    #[test]
    fn test_echoed_fields_are_ignored() {
        let value = json!({ "filename": "evil.pdf", "extractedText": "made up" });
        let result = normalize_value(&value);
        assert_eq!(result.filename, "");
        assert_eq!(result.extracted_text, "");
    }
}
