//! Sending a selected file to the upload endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart;

use super::{ClientError, SelectedAsset};
use crate::server::UPLOAD_FIELD;

/// Raw answer of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers one upload and returns whatever the server answered.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Transport failures are errors; any HTTP status is a response.
    async fn send(&self, asset: &SelectedAsset) -> Result<TransportResponse, ClientError>;
}

/// Multipart POST over HTTP, without authentication.
#[derive(Clone)]
pub struct HttpUploader {
    client: reqwest::Client,
    url: String,
}

impl HttpUploader {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl UploadTransport for HttpUploader {
    async fn send(&self, asset: &SelectedAsset) -> Result<TransportResponse, ClientError> {
        let part = multipart::Part::bytes(asset.bytes.to_vec())
            .file_name(asset.name.clone())
            .mime_str(&asset.media_type)
            .map_err(|e| ClientError::NetworkOrServer(e.to_string()))?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::NetworkOrServer(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::NetworkOrServer(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}
