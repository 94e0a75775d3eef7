//! Cloudinary signed-upload media host.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use vidhub_core::config::media::CloudinaryConfig;
use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_core::traits::media::{MediaHost, MediaUpload, UploadedMedia};

/// Uploads files to Cloudinary with a SHA-256 request signature.
#[derive(Clone)]
pub struct CloudinaryMediaHost {
    client: Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl std::fmt::Debug for CloudinaryMediaHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryMediaHost")
            .field("upload_url", &self.upload_url)
            .field("folder", &self.folder)
            .finish()
    }
}

/// The part of Cloudinary's upload response we keep.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    bytes: u64,
}

impl CloudinaryMediaHost {
    /// Create a host from configuration. The HTTP client carries the
    /// configured timeout.
    pub fn new(config: &CloudinaryConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build media host HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            upload_url: format!(
                "{}/{}/auto/upload",
                config.api_base_url.trim_end_matches('/'),
                config.cloud_name
            ),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        })
    }

    /// Build the signed JSON body for one upload.
    fn request_body(&self, upload: &MediaUpload, timestamp: i64) -> serde_json::Value {
        let mut signed = BTreeMap::new();
        signed.insert("folder", self.folder.clone());
        signed.insert("timestamp", timestamp.to_string());
        let signature = sign_params(&signed, &self.api_secret);

        serde_json::json!({
            "file": format!("data:{};base64,{}", upload.mime_type(), BASE64.encode(&upload.data)),
            "api_key": self.api_key,
            "folder": self.folder,
            "timestamp": timestamp,
            "signature": signature,
            "signature_algorithm": "sha256",
        })
    }
}

/// `hex(sha256("k1=v1&k2=v2..." + secret))` over params sorted by key.
fn sign_params(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let joined = params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaHost for CloudinaryMediaHost {
    fn provider_type(&self) -> &str {
        "cloudinary"
    }

    async fn upload(&self, upload: MediaUpload) -> AppResult<UploadedMedia> {
        upload.ensure_not_empty()?;

        let body = self.request_body(&upload, Utc::now().timestamp());
        debug!(file = %upload.file_name, bytes = upload.data.len(), "Uploading to Cloudinary");

        let response = self
            .client
            .post(&self.upload_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Cloudinary request failed");
                AppError::with_source(
                    ErrorKind::UpstreamUploadFailed,
                    format!("Failed to upload '{}'", upload.file_name),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Cloudinary rejected upload");
            return Err(AppError::upstream_upload(format!(
                "Media host rejected '{}' with status {status}",
                upload.file_name
            )));
        }

        let parsed: UploadResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UpstreamUploadFailed,
                "Unreadable media host response",
                e,
            )
        })?;

        Ok(UploadedMedia {
            url: parsed.secure_url,
            public_id: parsed.public_id,
            bytes: if parsed.bytes > 0 {
                parsed.bytes
            } else {
                upload.data.len() as u64
            },
        })
    }
}
