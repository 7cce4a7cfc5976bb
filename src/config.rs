//! Configuration management for contentlens using the prefer crate.
//!
//! Configuration is discovered once at startup, merged with environment
//! overrides, and passed explicitly into the pipeline and client.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::DEFAULT_SUMMARY_CHARS;
use crate::client::ClientConfig;
use crate::llm::LlmConfig;

/// Default server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default upload ceiling (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Upload server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (host:port).
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Largest accepted upload in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Text extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Language hint handed to the OCR engine.
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_language: default_ocr_language(),
        }
    }
}

/// Result assembly settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Characters of extracted text used when the model gives no summary.
    #[serde(default = "default_summary_chars")]
    pub summary_chars: usize,
}

fn default_summary_chars() -> usize {
    DEFAULT_SUMMARY_CHARS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            summary_chars: default_summary_chars(),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// LLM configuration for content analysis.
    #[serde(default, skip_serializing_if = "LlmConfig::is_default")]
    pub llm: LlmConfig,
    /// Settings for the upload client.
    #[serde(default)]
    pub client: ClientConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

/// How to locate configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file (skips discovery).
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers contentlens config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("contentlens").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}; using defaults", e);
                            Self::default_with_env()
                        }
                    }
                } else {
                    Self::default_with_env()
                }
            }
            Err(_) => {
                // No config file found, use defaults with env overrides
                Self::default_with_env()
            }
        }
    }

    /// Default configuration with environment variable overrides applied.
    pub fn default_with_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config.with_env_overrides())
    }

    /// Parse config contents, choosing the format from the path's extension.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, String> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        match ext {
            "toml" => {
                toml::from_str(contents).map_err(|e| format!("Failed to parse TOML config: {}", e))
            }
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Apply environment variable overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Supported variables:
    /// - `PORT`: replaces the port of the bind address
    /// - `CONTENTLENS_BIND`: full bind address (wins over `PORT`)
    /// - `CONTENTLENS_MAX_UPLOAD_BYTES`: upload ceiling
    /// - `OCR_LANGUAGE`: OCR language hint
    /// - `CONTENTLENS_SERVER_URL`: upload URL used by the client
    /// - `LLM_*`, `GEMINI_API_KEY`: see [`LlmConfig::with_env_overrides`]
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = var("PORT").and_then(|p| p.parse::<u16>().ok()) {
            let host = self
                .server
                .bind
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| self.server.bind.clone());
            self.server.bind = format!("{}:{}", host, port);
        }
        if let Some(bind) = var("CONTENTLENS_BIND").filter(|s| !s.is_empty()) {
            self.server.bind = bind;
        }
        if let Some(n) = var("CONTENTLENS_MAX_UPLOAD_BYTES").and_then(|v| v.parse().ok()) {
            self.server.max_upload_bytes = n;
        }
        if let Some(lang) = var("OCR_LANGUAGE").filter(|s| !s.is_empty()) {
            self.extraction.ocr_language = lang;
        }
        if let Some(url) = var("CONTENTLENS_SERVER_URL").filter(|s| !s.is_empty()) {
            self.client.server_url = url;
        }
        self.llm = self.llm.with_overrides(&var);
        self
    }
}

/// Resolve a path that may start with `~`.
pub fn expand_path(path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    PathBuf::from(expanded)
}

/// Load configuration with explicit options.
pub async fn load_config(options: LoadOptions) -> Config {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        let path = expand_path(config_path);
        return match Config::load_from_path(&path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Config::default_with_env()
            }
        };
    }

    // Priority 2: Auto-discover via prefer
    Config::load().await
}
