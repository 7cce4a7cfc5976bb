//! Content analysis: prompting, normalization and result assembly.

mod assemble;
mod diagnostics;
mod invoker;
mod normalize;
mod types;

pub use assemble::{assemble, summarize, DEFAULT_SUMMARY_CHARS};
pub use diagnostics::{Diagnostics, DiagnosticsSnapshot, FailureRecord, FallbackKind};
pub use invoker::Analyzer;
pub use normalize::{normalize, normalize_value, parse_response, strip_code_fences, Normalized};
pub use types::{
    AnalysisResult, ContentType, EngagementScore, MinimalResult, MinimalSuggestions,
    ResponseContract, Suggestions, MAX_ENGAGEMENT_SCORE,
};
