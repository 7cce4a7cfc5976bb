//! The client session state machine.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::progress::ProgressTicker;
use super::{ClientConfig, ClientError, SelectedAsset, UploadTransport};
use crate::analysis::ResponseContract;

/// The single message shown for every network or server failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during analysis. Please try again.";

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Uploading,
    Analyzing,
    Complete,
    Error,
}

impl Status {
    /// A request is outstanding; the analyze action must stay disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, Status::Uploading | Status::Analyzing)
    }

    /// Complete and error persist until an explicit reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Complete | Status::Error)
    }
}

/// Everything the user currently sees.
#[derive(Debug, Clone, Default)]
pub struct ClientSession {
    pub asset: Option<SelectedAsset>,
    pub preview: Option<String>,
    pub status: Status,
    pub progress: u8,
    pub result: Option<ResponseContract>,
    pub error: Option<String>,
}

/// Owns one session, its progress ticker and the transport used to upload.
pub struct PipelineController<T: UploadTransport> {
    transport: T,
    config: ClientConfig,
    session: ClientSession,
    status_tx: watch::Sender<Status>,
    progress_tx: Arc<watch::Sender<u8>>,
    ticker: Option<ProgressTicker>,
}

impl<T: UploadTransport> PipelineController<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let (status_tx, _) = watch::channel(Status::Idle);
        let (progress_tx, _) = watch::channel(0);

        Self {
            transport,
            config,
            session: ClientSession::default(),
            status_tx,
            progress_tx: Arc::new(progress_tx),
            ticker: None,
        }
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    pub fn status(&self) -> Status {
        self.session.status
    }

    /// Follow status transitions as they happen.
    pub fn subscribe_status(&self) -> watch::Receiver<Status> {
        self.status_tx.subscribe()
    }

    /// Follow the progress percentage, including ticker increments.
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress_tx.subscribe()
    }

    /// Whether a progress ticker is still alive.
    pub fn ticker_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(ProgressTicker::is_running)
    }

    /// Select a file. Invalid files are refused with an inline message and the
    /// status does not change.
    pub fn select(&mut self, asset: SelectedAsset) -> Result<(), ClientError> {
        if self.session.status.is_busy() {
            return Err(ClientError::Busy);
        }
        if self.session.status.is_terminal() {
            return Err(ClientError::Finished);
        }

        if let Err(e) = asset.validate(self.config.max_upload_bytes) {
            self.session.error = Some(e.to_string());
            return Err(e);
        }

        self.session.preview = Some(asset.preview());
        self.session.asset = Some(asset);
        self.session.error = None;
        Ok(())
    }

    /// Upload the selected file and wait for its analysis.
    pub async fn analyze(&mut self) -> Result<&ResponseContract, ClientError> {
        if self.session.status.is_busy() {
            return Err(ClientError::Busy);
        }
        if self.session.status != Status::Idle {
            return Err(ClientError::Finished);
        }
        let asset = self.session.asset.clone().ok_or(ClientError::NotReady)?;

        self.session.error = None;
        self.set_progress(0);
        self.set_status(Status::Uploading);
        self.ticker = Some(ProgressTicker::start(
            Arc::clone(&self.progress_tx),
            self.config.tick_interval(),
            self.config.progress_step,
            self.config.progress_ceiling,
        ));

        let outcome = self.transport.send(&asset).await;
        self.stop_ticker();

        let response = match outcome {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                return Err(self.fail(format!("server answered HTTP {}", response.status)));
            }
            Err(e) => return Err(self.fail(e.to_string())),
        };

        self.set_progress(100);
        self.set_status(Status::Analyzing);
        tokio::time::sleep(self.config.reveal_delay()).await;

        let contract = match ResponseContract::from_slice(&response.body) {
            Ok(contract) => contract,
            Err(e) => return Err(self.fail(format!("unreadable response body: {}", e))),
        };

        debug!("Analysis of {} complete", asset.name);
        self.set_status(Status::Complete);
        Ok(self.session.result.insert(contract))
    }

    /// Clear everything and return to idle.
    pub fn reset(&mut self) {
        self.stop_ticker();
        self.session = ClientSession::default();
        self.progress_tx.send_replace(0);
        self.status_tx.send_replace(Status::Idle);
    }

    fn fail(&mut self, cause: String) -> ClientError {
        warn!("Upload failed: {}", cause);
        self.session.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
        self.set_status(Status::Error);
        ClientError::NetworkOrServer(cause)
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.session.progress = *self.progress_tx.borrow();
    }

    fn set_status(&mut self, status: Status) {
        self.session.status = status;
        self.status_tx.send_replace(status);
    }

    fn set_progress(&mut self, progress: u8) {
        self.session.progress = progress;
        self.progress_tx.send_replace(progress);
    }
}
