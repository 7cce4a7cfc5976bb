//! Upload client: file selection, the session state machine and rendering.
//!
//! [`PipelineController`] drives one session at a time through
//! `idle → uploading → analyzing → complete`, or into `error`.

mod asset;
mod config;
mod controller;
mod progress;
mod render;
mod transport;

use thiserror::Error;

pub use asset::{SelectedAsset, ACCEPTED_MEDIA_TYPES, TOO_LARGE_MESSAGE, UNSUPPORTED_TYPE_MESSAGE};
pub use config::ClientConfig;
pub use controller::{ClientSession, PipelineController, Status, GENERIC_FAILURE_MESSAGE};
pub use progress::ProgressTicker;
pub use render::render;
pub use transport::{HttpUploader, TransportResponse, UploadTransport};

/// Errors raised by the upload client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The selected file failed the type or size gate. Shown inline.
    #[error("{0}")]
    Validation(String),

    #[error("No file selected")]
    NotReady,

    #[error("An analysis is already in progress")]
    Busy,

    #[error("Start a new analysis before selecting another file")]
    Finished,

    /// Any transport failure or non-success response. The cause is logged only.
    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    NetworkOrServer(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}
