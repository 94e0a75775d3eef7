//! Watch history projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vidhub_core::types::{UserId, VideoId};

use crate::user::User;
use crate::video::Video;

/// Public summary of a video owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    /// Owner id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Owner username.
    pub username: String,
    /// Owner full name.
    pub full_name: String,
    /// Owner avatar URL.
    pub avatar: String,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// A watched video with its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    /// Video id.
    #[serde(rename = "_id")]
    pub id: VideoId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Thumbnail URL.
    pub thumbnail: String,
    /// Video file URL.
    pub video_file: String,
    /// Duration in seconds.
    pub duration: f64,
    /// View count.
    pub views: i64,
    /// Owner summary.
    pub owner: OwnerSummary,
}

impl VideoSummary {
    /// Join a video with its owner.
    pub fn new(video: &Video, owner: OwnerSummary) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            description: video.description.clone(),
            thumbnail: video.thumbnail.clone(),
            video_file: video.video_file.clone(),
            duration: video.duration,
            views: video.views,
            owner,
        }
    }
}

/// One row of a user's watch history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    /// The watched video.
    pub video: VideoSummary,
    /// Last time the user watched it.
    pub watched_at: DateTime<Utc>,
}
