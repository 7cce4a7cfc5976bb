//! Upload client settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the client reaches the server and paces its progress display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Upload endpoint.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Largest file the client will send, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Milliseconds between synthetic progress increments.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Percentage points added per tick.
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,
    /// Percentage the ticker never exceeds while waiting.
    #[serde(default = "default_progress_ceiling")]
    pub progress_ceiling: u8,
    /// Milliseconds spent in the analyzing state before results are shown.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

fn default_server_url() -> String {
    "http://localhost:5000/upload".to_string()
}

fn default_max_upload_bytes() -> usize {
    crate::config::DEFAULT_MAX_UPLOAD_BYTES
}

fn default_tick_interval_ms() -> u64 {
    200
}

fn default_progress_step() -> u8 {
    10
}

fn default_progress_ceiling() -> u8 {
    90
}

fn default_reveal_delay_ms() -> u64 {
    1500
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            max_upload_bytes: default_max_upload_bytes(),
            tick_interval_ms: default_tick_interval_ms(),
            progress_step: default_progress_step(),
            progress_ceiling: default_progress_ceiling(),
            reveal_delay_ms: default_reveal_delay_ms(),
        }
    }
}

impl ClientConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Use a different upload endpoint.
    pub fn with_server_url(mut self, url: &str) -> Self {
        self.server_url = url.to_string();
        self
    }
}
