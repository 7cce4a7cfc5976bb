//! LLM client configuration.

use serde::{Deserialize, Serialize};

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API (default)
    #[default]
    Gemini,
    /// Ollama API (local)
    Ollama,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    /// Endpoint used when none is configured.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Ollama => "http://localhost:11434",
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

/// Configuration for the analysis LLM client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether AI analysis is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// LLM provider (gemini or ollama)
    #[serde(default)]
    pub provider: LlmProvider,
    /// API endpoint (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// API key (required for Gemini)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model to use for analysis
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum characters of extracted text to send to the LLM
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_content_chars() -> usize {
    12000
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: LlmProvider::default(),
            endpoint: None,
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_content_chars: default_max_content_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Check if the config equals the default (for skip_serializing_if).
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Effective endpoint, falling back to the provider default.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.provider.default_endpoint())
            .trim_end_matches('/')
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_ENABLED`: "true" or "false"
    /// - `LLM_PROVIDER`: "gemini" (default) or "ollama"
    /// - `LLM_ENDPOINT`: API endpoint (defaults based on provider)
    /// - `LLM_API_KEY`: API key, wins over `GEMINI_API_KEY`
    /// - `GEMINI_API_KEY`: API key for Gemini
    /// - `LLM_MODEL`: Model name
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_TEMPERATURE`: Generation temperature (0.0-1.0)
    /// - `LLM_MAX_CONTENT_CHARS`: Max extracted chars to send
    /// - `LLM_TIMEOUT_SECS`: Request timeout
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = var("LLM_ENABLED") {
            self.enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }
        if let Some(provider) = var("LLM_PROVIDER").and_then(|v| LlmProvider::from_str(&v)) {
            self.provider = provider;
        }
        if let Some(endpoint) = var("LLM_ENDPOINT").filter(|s| !s.is_empty()) {
            self.endpoint = Some(endpoint);
        }

        // Explicit API key always wins
        if let Some(key) = var("LLM_API_KEY").filter(|s| !s.is_empty()) {
            self.api_key = Some(key);
        } else if self.api_key.is_none() && self.provider == LlmProvider::Gemini {
            self.api_key = var("GEMINI_API_KEY").filter(|s| !s.is_empty());
        }

        if let Some(val) = var("LLM_MODEL") {
            self.model = val;
        }
        if let Some(n) = var("LLM_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.max_tokens = n;
        }
        if let Some(t) = var("LLM_TEMPERATURE").and_then(|v| v.parse().ok()) {
            self.temperature = t;
        }
        if let Some(n) = var("LLM_MAX_CONTENT_CHARS").and_then(|v| v.parse().ok()) {
            self.max_content_chars = n;
        }
        if let Some(n) = var("LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = n;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert!(config.enabled);
        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com"
        );
        assert!(config.is_default());
    }

    #[test]
    fn test_gemini_key_from_env() {
        let config = LlmConfig::default().with_overrides(lookup(&[("GEMINI_API_KEY", "g-key")]));
        assert_eq!(config.api_key.as_deref(), Some("g-key"));
    }

    #[test]
    fn test_llm_api_key_wins() {
        let config = LlmConfig::default().with_overrides(lookup(&[
            ("GEMINI_API_KEY", "g-key"),
            ("LLM_API_KEY", "explicit"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_ollama_provider_switches_default_endpoint() {
        let config = LlmConfig::default().with_overrides(lookup(&[
            ("LLM_PROVIDER", "ollama"),
            ("LLM_MODEL", "llama3.2"),
            ("LLM_TIMEOUT_SECS", "30"),
            ("LLM_TEMPERATURE", "not-a-number"),
        ]));
        assert_eq!(config.provider, LlmProvider::Ollama);
        assert_eq!(config.endpoint(), "http://localhost:11434");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.temperature, 0.4);
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let config = LlmConfig::default()
            .with_overrides(lookup(&[("LLM_ENDPOINT", "http://proxy.local/")]));
        assert_eq!(config.endpoint(), "http://proxy.local");
    }

    #[test]
    fn test_disable_via_env() {
        let config = LlmConfig::default().with_overrides(lookup(&[("LLM_ENABLED", "false")]));
        assert!(!config.enabled);
    }
}
