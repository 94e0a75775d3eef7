//! Media host trait for avatar, cover image, and video uploads.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// A file received from a client, held in memory until it is uploaded.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// Original file name as sent by the client.
    pub file_name: String,
    /// MIME type as sent by the client.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub data: Bytes,
}

impl MediaUpload {
    /// Create a new upload from its parts.
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    /// Reject uploads with no content before any network call is made.
    pub fn ensure_not_empty(&self) -> AppResult<()> {
        if self.data.is_empty() {
            return Err(AppError::validation(format!(
                "Uploaded file '{}' is empty",
                self.file_name
            )));
        }
        Ok(())
    }

    /// MIME type, falling back to `application/octet-stream`.
    pub fn mime_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or("application/octet-stream")
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
    /// Publicly reachable URL of the stored asset.
    pub url: String,
    /// Provider-specific identifier.
    pub public_id: String,
    /// Stored size in bytes.
    pub bytes: u64,
}

/// Trait for remote or local media hosting backends.
///
/// Implementations live in `vidhub-storage`. Any provider-side failure
/// must surface as [`crate::ErrorKind::UpstreamUploadFailed`].
#[async_trait]
pub trait MediaHost: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "cloudinary", "local").
    fn provider_type(&self) -> &str;

    /// Upload a single file and return where it can be reached.
    async fn upload(&self, upload: MediaUpload) -> AppResult<UploadedMedia>;
}
