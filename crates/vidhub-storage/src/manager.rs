//! Media host selection from configuration.

use std::sync::Arc;

use tracing::info;

use vidhub_core::config::media::MediaConfig;
use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::traits::media::MediaHost;

use crate::providers::{CloudinaryMediaHost, LocalMediaHost};

/// Build the media host named by `media.provider`.
pub async fn create_media_host(config: &MediaConfig) -> AppResult<Arc<dyn MediaHost>> {
    let host: Arc<dyn MediaHost> = match config.provider.to_ascii_lowercase().as_str() {
        "cloudinary" => Arc::new(CloudinaryMediaHost::new(&config.cloudinary)?),
        "local" => Arc::new(LocalMediaHost::new(&config.local).await?),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown media provider '{other}'"
            )));
        }
    };
    info!(provider = host.provider_type(), "Media host initialized");
    Ok(host)
}
