//! Local filesystem media host.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use vidhub_core::config::media::LocalMediaConfig;
use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_core::traits::media::{MediaHost, MediaUpload, UploadedMedia};

/// Writes uploads under a directory that is served at a public URL prefix.
#[derive(Debug, Clone)]
pub struct LocalMediaHost {
    /// Root directory for stored media.
    root: PathBuf,
    /// URL prefix mapped to `root`.
    public_base_url: String,
}

impl LocalMediaHost {
    /// Create the host, creating the root directory if needed.
    pub async fn new(config: &LocalMediaConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.directory);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to create media directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Generated object name keeping a sanitized extension of the original.
    fn object_name(file_name: &str) -> String {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();
        format!("{}{ext}", Uuid::new_v4().simple())
    }
}

#[async_trait]
impl MediaHost for LocalMediaHost {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn upload(&self, upload: MediaUpload) -> AppResult<UploadedMedia> {
        upload.ensure_not_empty()?;

        let name = Self::object_name(&upload.file_name);
        let path = self.root.join(&name);
        fs::write(&path, &upload.data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UpstreamUploadFailed,
                format!("Failed to store '{}'", upload.file_name),
                e,
            )
        })?;

        debug!(path = %path.display(), bytes = upload.data.len(), "Stored media locally");
        Ok(UploadedMedia {
            url: format!("{}/{name}", self.public_base_url),
            public_id: name,
            bytes: upload.data.len() as u64,
        })
    }
}
