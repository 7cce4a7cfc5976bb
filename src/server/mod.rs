//! HTTP upload server.
//!
//! Accepts a single document per request under the `file` multipart field,
//! runs extraction and analysis, and answers with the analysis contract.

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use handlers::UPLOAD_FIELD;
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::Pipeline;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Largest accepted file, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let pipeline = Pipeline::from_config(config)?;

        Ok(Self {
            pipeline: Arc::new(pipeline),
            max_upload_bytes: config.server.max_upload_bytes,
        })
    }
}

/// Start the web server.
pub async fn serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
