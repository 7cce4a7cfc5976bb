//! LLM integration for content analysis.
//!
//! The analysis step talks to a generative model through the
//! [`AnalysisProvider`] trait. [`LlmClient`] implements it for Gemini and
//! Ollama.

mod client;
mod config;
mod prompts;

use async_trait::async_trait;

pub use client::LlmClient;
pub use config::{LlmConfig, LlmProvider};
pub use prompts::{analysis_prompt, ANALYSIS_PROMPT};

/// A generative model that answers a single-turn prompt with raw text.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Send one prompt and return the model's text, without retrying.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Errors that can occur during LLM operations.
#[derive(Debug)]
pub enum LlmError {
    /// Failed to connect to LLM service
    Connection(String),
    /// API returned an error
    Api(String),
    /// Failed to parse response
    Parse(String),
    /// No API key configured for a provider that requires one
    MissingApiKey(String),
    /// LLM is disabled
    Disabled,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::Connection(msg) => write!(f, "Connection error: {}", msg),
            LlmError::Api(msg) => write!(f, "API error: {}", msg),
            LlmError::Parse(msg) => write!(f, "Parse error: {}", msg),
            LlmError::MissingApiKey(provider) => write!(f, "No API key configured for {}", provider),
            LlmError::Disabled => write!(f, "LLM is disabled"),
        }
    }
}

impl std::error::Error for LlmError {}
