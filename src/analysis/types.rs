//! Response contract types.

use serde::{Deserialize, Serialize};

use super::normalize::normalize_value;

/// Upper bound of the engagement score.
pub const MAX_ENGAGEMENT_SCORE: u32 = 100;

/// Classified kind of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    SocialPost,
    Resume,
    Quote,
    Document,
    #[default]
    #[serde(other)]
    Other,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::SocialPost => "social_post",
            ContentType::Resume => "resume",
            ContentType::Quote => "quote",
            ContentType::Document => "document",
            ContentType::Other => "other",
        }
    }

    /// Parse a content type label; unknown labels yield `None`.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "social_post" => Some(ContentType::SocialPost),
            "resume" => Some(ContentType::Resume),
            "quote" => Some(ContentType::Quote),
            "document" => Some(ContentType::Document),
            "other" => Some(ContentType::Other),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::SocialPost => "Social post",
            ContentType::Resume => "Resume",
            ContentType::Quote => "Quote",
            ContentType::Document => "Document",
            ContentType::Other => "Other",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engagement score with its justification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementScore {
    pub score: u32,
    pub reason: String,
}

/// Actionable suggestions for the content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestions {
    pub message: String,
    pub actions: Vec<String>,
    pub hooks: Vec<String>,
    #[serde(rename = "callToAction")]
    pub call_to_action: Vec<String>,
    pub hashtags: Vec<String>,
}

/// The full response contract of the upload endpoint.
///
/// Every field is always present; defaults are empty strings, empty lists,
/// a zero score and [`ContentType::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub filename: String,
    pub content_type: ContentType,
    pub analysis: String,
    pub extracted_text_summary: String,
    #[serde(rename = "extractedText")]
    pub extracted_text: String,
    pub engagement_score: EngagementScore,
    pub suggestions: Suggestions,
}

/// Suggestions carried by the reduced contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimalSuggestions {
    pub hooks: Vec<String>,
    pub hashtags: Vec<String>,
    #[serde(rename = "callToAction")]
    pub call_to_action: Vec<String>,
}

/// The reduced contract returned by simplified deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimalResult {
    #[serde(rename = "extractedText")]
    pub extracted_text: String,
    pub suggestions: MinimalSuggestions,
}

/// A response body as understood by the client.
///
/// The two variants are kept distinct: a body is the full contract exactly
/// when it carries a `content_type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseContract {
    Full(AnalysisResult),
    Minimal(MinimalResult),
}

impl ResponseContract {
    /// Decode a response body into one of the contract variants.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Fields of the wrong shape fall back to their defaults, as on the server.
    /// Only a body that is not a JSON object is rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let Some(root) = value.as_object() else {
            return Err(serde::de::Error::custom("response body is not a JSON object"));
        };
        let text_field = |key: &str| {
            root.get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let mut normalized = normalize_value(&value);
        normalized.extracted_text = text_field("extractedText");

        if root.contains_key("content_type") {
            normalized.filename = text_field("filename");
            Ok(Self::Full(normalized))
        } else {
            let suggestions = normalized.suggestions;
            Ok(Self::Minimal(MinimalResult {
                extracted_text: normalized.extracted_text,
                suggestions: MinimalSuggestions {
                    hooks: suggestions.hooks,
                    hashtags: suggestions.hashtags,
                    call_to_action: suggestions.call_to_action,
                },
            }))
        }
    }

    pub fn extracted_text(&self) -> &str {
        match self {
            Self::Full(r) => &r.extracted_text,
            Self::Minimal(r) => &r.extracted_text,
        }
    }

    pub fn hooks(&self) -> &[String] {
        match self {
            Self::Full(r) => &r.suggestions.hooks,
            Self::Minimal(r) => &r.suggestions.hooks,
        }
    }

    pub fn hashtags(&self) -> &[String] {
        match self {
            Self::Full(r) => &r.suggestions.hashtags,
            Self::Minimal(r) => &r.suggestions.hashtags,
        }
    }

    pub fn call_to_action(&self) -> &[String] {
        match self {
            Self::Full(r) => &r.suggestions.call_to_action,
            Self::Minimal(r) => &r.suggestions.call_to_action,
        }
    }

    /// The full result, when this is the full contract.
    pub fn full(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Full(r) => Some(r),
            Self::Minimal(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_result_serializes_every_field() {
        let json = serde_json::to_value(AnalysisResult::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "filename": "",
                "content_type": "other",
                "analysis": "",
                "extracted_text_summary": "",
                "extractedText": "",
                "engagement_score": { "score": 0, "reason": "" },
                "suggestions": {
                    "message": "",
                    "actions": [],
                    "hooks": [],
                    "callToAction": [],
                    "hashtags": []
                }
            })
        );
    }

    #[test]
    fn test_content_type_labels() {
        for ct in [
            ContentType::SocialPost,
            ContentType::Resume,
            ContentType::Quote,
            ContentType::Document,
            ContentType::Other,
        ] {
            assert_eq!(ContentType::from_label(ct.as_str()), Some(ct));
        }
        assert_eq!(ContentType::from_label(" Resume "), Some(ContentType::Resume));
        assert_eq!(ContentType::from_label("meme"), None);
    }

    #[test]
    fn test_contract_detects_full_variant() {
        let body = br##"{"filename":"a.png","content_type":"quote","extractedText":"Be kind",
            "suggestions":{"hooks":["h"],"hashtags":["#kind"],"callToAction":["Share"]}}"##;
        let contract = ResponseContract::from_slice(body).unwrap();
        let full = contract.full().expect("full contract");
        assert_eq!(full.content_type, ContentType::Quote);
        assert_eq!(full.filename, "a.png");
        assert_eq!(contract.hashtags(), ["#kind".to_string()]);
        assert!(full.suggestions.actions.is_empty());
    }

    #[test]
    fn test_contract_detects_minimal_variant() {
        let body = br#"{"extractedText":"Hello","suggestions":{"hooks":["Hook"],"hashtags":[],"callToAction":["Follow"]}}"#;
        let contract = ResponseContract::from_slice(body).unwrap();
        assert!(contract.full().is_none());
        assert_eq!(contract.extracted_text(), "Hello");
        assert_eq!(contract.hooks(), ["Hook".to_string()]);
        assert_eq!(contract.call_to_action(), ["Follow".to_string()]);
    }

    #[test]
    fn test_contract_tolerates_mistyped_fields() {
        let body = br#"{"filename":"q.png","content_type":null,"analysis":null,
            "extractedText":"Carpe diem","engagement_score":{"score":"80.4","reason":7},
            "suggestions":{"hooks":["h",null],"hashtags":"none"}}"#;

        let contract = ResponseContract::from_slice(body).unwrap();

        let full = contract.full().expect("full contract");
        assert_eq!(full.filename, "q.png");
        assert_eq!(full.content_type, ContentType::Other);
        assert_eq!(full.analysis, "");
        assert_eq!(full.extracted_text, "Carpe diem");
        assert_eq!(full.engagement_score.score, 80);
        assert_eq!(full.suggestions.hooks, vec!["h"]);
        assert!(full.suggestions.hashtags.is_empty());
    }

    #[test]
    fn test_contract_rejects_non_objects() {
        assert!(ResponseContract::from_slice(b"<html>").is_err());
        assert!(ResponseContract::from_slice(b"[1, 2]").is_err());
    }
}
