//! Operator-facing record of absorbed analysis failures.
//!
//! Failed or unparseable model calls never reach the response body; they are
//! logged under the `contentlens::diagnostics` target and counted here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::Serialize;
use tracing::warn;

/// Why an analysis fell back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// The model call failed (transport, provider, configuration).
    CallFailed,
    /// The model answered, but not with parseable JSON.
    Unparseable,
}

/// Counters and last cause of degraded analyses.
#[derive(Debug, Default)]
pub struct Diagnostics {
    analyses: AtomicU64,
    call_failures: AtomicU64,
    parse_failures: AtomicU64,
    last_failure: RwLock<Option<FailureRecord>>,
}

/// Most recent absorbed failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub kind: FallbackKind,
    pub cause: String,
}

/// Point-in-time copy of the diagnostics counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsSnapshot {
    pub analyses: u64,
    pub call_failures: u64,
    pub parse_failures: u64,
    pub last_failure: Option<FailureRecord>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_analysis(&self) {
        self.analyses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self, kind: FallbackKind, cause: impl Into<String>) {
        let cause = cause.into();
        warn!(
            target: "contentlens::diagnostics",
            kind = ?kind,
            "analysis fell back to defaults: {}",
            cause
        );

        let counter = match kind {
            FallbackKind::CallFailed => &self.call_failures,
            FallbackKind::Unparseable => &self.parse_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut guard) = self.last_failure.write() {
            *guard = Some(FailureRecord { kind, cause });
        }
    }

    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            analyses: self.analyses.load(Ordering::Relaxed),
            call_failures: self.call_failures.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            last_failure: self.last_failure.read().ok().and_then(|g| g.clone()),
        }
    }
}
