//! Client-side file selection and validation.

use std::path::Path;

use bytes::Bytes;

use super::ClientError;

/// Media types the client is willing to send.
pub const ACCEPTED_MEDIA_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "application/pdf"];

pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please upload an image (JPEG, PNG, WEBP) or PDF file.";
pub const TOO_LARGE_MESSAGE: &str = "File size must be less than 5MB.";

/// A file chosen by the user, held in memory until it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAsset {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl SelectedAsset {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing its type from the extension and then
    /// from its leading bytes.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;

        let media_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .or_else(|| infer::get(&bytes).map(|kind| kind.mime_type().to_string()))
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self::new(name, media_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// One-line description shown while the file is selected.
    pub fn preview(&self) -> String {
        format!(
            "{} ({}, {:.1} KiB)",
            self.name,
            self.media_type,
            self.size() as f64 / 1024.0
        )
    }

    /// Check the type and size gate before any network call.
    pub fn validate(&self, max_bytes: usize) -> Result<(), ClientError> {
        if !ACCEPTED_MEDIA_TYPES.contains(&self.media_type.as_str()) {
            return Err(ClientError::Validation(UNSUPPORTED_TYPE_MESSAGE.to_string()));
        }
        if self.size() > max_bytes {
            return Err(ClientError::Validation(TOO_LARGE_MESSAGE.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LIMIT: usize = 5 * 1024 * 1024;

    #[test]
    fn test_accepts_permitted_types_at_limit() {
        for media_type in ACCEPTED_MEDIA_TYPES {
            let asset = SelectedAsset::new("f", media_type, vec![0u8; LIMIT]);
            assert!(asset.validate(LIMIT).is_ok(), "{} rejected", media_type);
        }
    }

    #[test]
    fn test_rejects_other_types() {
        let asset = SelectedAsset::new("a.gif", "image/gif", vec![0u8; 10]);
        let err = asset.validate(LIMIT).unwrap_err();
        assert_eq!(err.to_string(), UNSUPPORTED_TYPE_MESSAGE);
    }

    #[test]
    fn test_rejects_oversized() {
        let asset = SelectedAsset::new("big.png", "image/png", vec![0u8; LIMIT + 1]);
        let err = asset.validate(LIMIT).unwrap_err();
        assert_eq!(err.to_string(), TOO_LARGE_MESSAGE);
    }

    #[tokio::test]
    async fn test_from_path_uses_extension() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let asset = SelectedAsset::from_path(file.path()).await.unwrap();

        assert_eq!(asset.media_type, "application/pdf");
        assert_eq!(asset.size(), 8);
        assert!(asset.name.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_from_path_sniffs_content_without_extension() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0])
            .unwrap();

        let asset = SelectedAsset::from_path(file.path()).await.unwrap();

        assert_eq!(asset.media_type, "image/png");
    }
}
