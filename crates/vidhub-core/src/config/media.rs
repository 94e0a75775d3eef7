//! Media host configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Media host selection and provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Provider: `"cloudinary"` or `"local"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Cloudinary settings.
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,
    /// Local filesystem settings.
    #[serde(default)]
    pub local: LocalMediaConfig,
}

impl MediaConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        match self.provider.to_ascii_lowercase().as_str() {
            "cloudinary" => {
                let c = &self.cloudinary;
                if c.cloud_name.is_empty() || c.api_key.is_empty() || c.api_secret.is_empty() {
                    return Err(AppError::configuration(
                        "media.cloudinary requires cloud_name, api_key and api_secret",
                    ));
                }
                Ok(())
            }
            "local" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown media provider '{other}'"
            ))),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            cloudinary: CloudinaryConfig::default(),
            local: LocalMediaConfig::default(),
        }
    }
}

/// Cloudinary signed-upload credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    /// Cloud name (path segment of the upload URL).
    #[serde(default)]
    pub cloud_name: String,
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// API secret used for request signing.
    #[serde(default)]
    pub api_secret: String,
    /// Destination folder.
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Base URL of the upload API.
    #[serde(default = "default_api_base")]
    pub api_base_url: String,
    /// Upload request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            folder: default_folder(),
            api_base_url: default_api_base(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Local filesystem media settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalMediaConfig {
    /// Directory where uploads are written.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// URL prefix under which the directory is served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalMediaConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_provider() -> String {
    "cloudinary".to_string()
}

fn default_folder() -> String {
    "vidhub".to_string()
}

fn default_api_base() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_directory() -> String {
    "./data/media".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8000/media".to_string()
}
