//! Video publishing through the media host.

use std::sync::Arc;

use tracing::{info, warn};

use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::traits::media::{MediaHost, MediaUpload};
use vidhub_database::repositories::VideoStore;
use vidhub_entity::video::{CreateVideo, Video};

use crate::context::RequestContext;

/// Input for [`VideoService::publish`].
#[derive(Debug, Clone)]
pub struct PublishVideo {
    pub title: String,
    pub description: String,
    /// Length in seconds.
    pub duration: f64,
    pub is_published: bool,
    pub video_file: Option<MediaUpload>,
    pub thumbnail: Option<MediaUpload>,
}

impl Default for PublishVideo {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: 0.0,
            is_published: true,
            video_file: None,
            thumbnail: None,
        }
    }
}

/// Creates videos owned by the calling channel.
#[derive(Debug, Clone)]
pub struct VideoService {
    videos: Arc<dyn VideoStore>,
    media: Arc<dyn MediaHost>,
}

impl VideoService {
    pub fn new(videos: Arc<dyn VideoStore>, media: Arc<dyn MediaHost>) -> Self {
        Self { videos, media }
    }

    /// Uploads the video file and thumbnail, then stores the video.
    ///
    /// Every field is checked before the first upload, and nothing is
    /// stored if either upload fails.
    pub async fn publish(&self, ctx: &RequestContext, input: PublishVideo) -> AppResult<Video> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if !input.duration.is_finite() || input.duration < 0.0 {
            return Err(AppError::validation("Duration must be a non-negative number"));
        }
        let video_file = input
            .video_file
            .filter(|f| !f.data.is_empty())
            .ok_or_else(|| AppError::validation("Video file is required"))?;
        let thumbnail = input
            .thumbnail
            .filter(|f| !f.data.is_empty())
            .ok_or_else(|| AppError::validation("Thumbnail is required"))?;

        let video_file = self.media.upload(video_file).await.inspect_err(|e| {
            warn!(user_id = %ctx.user_id, error = %e, "Video upload failed");
        })?;
        let thumbnail = self.media.upload(thumbnail).await?;

        let video = self
            .videos
            .create(CreateVideo {
                owner: ctx.user_id,
                video_file: video_file.url,
                thumbnail: thumbnail.url,
                title: title.to_string(),
                description: input.description.trim().to_string(),
                duration: input.duration,
                is_published: input.is_published,
            })
            .await?;

        info!(user_id = %ctx.user_id, video_id = %video.id, "Video published");
        Ok(video)
    }
}
