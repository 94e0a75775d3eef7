//! Video entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidhub_core::types::{UserId, VideoId};

/// A published or draft video owned by a channel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique video identifier.
    #[serde(rename = "_id")]
    pub id: VideoId,
    /// Owning channel.
    #[sqlx(rename = "owner_id")]
    pub owner: UserId,
    /// Video file URL.
    pub video_file: String,
    /// Thumbnail URL.
    pub thumbnail: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Duration in seconds.
    pub duration: f64,
    /// Number of recorded watches.
    pub views: i64,
    /// Whether the video is visible to others.
    pub is_published: bool,
    /// When the video was created.
    pub created_at: DateTime<Utc>,
    /// When the video was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a video.
#[derive(Debug, Clone)]
pub struct CreateVideo {
    /// Owning channel.
    pub owner: UserId,
    /// Video file URL.
    pub video_file: String,
    /// Thumbnail URL.
    pub thumbnail: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Duration in seconds.
    pub duration: f64,
    /// Published flag.
    pub is_published: bool,
}
