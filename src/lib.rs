//! Contentlens - document text extraction and social content analysis.
//!
//! Accepts an uploaded PDF or image, extracts its text, asks a generative
//! model to classify and score it, and reshapes whatever comes back into a
//! fully-populated [`analysis::AnalysisResult`].

pub mod analysis;
pub mod cli;
pub mod client;
pub mod config;
pub mod llm;
pub mod ocr;
pub mod pipeline;
pub mod server;
