//! Public channel profile projection.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidhub_core::types::UserId;

use crate::user::User;

/// A channel as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    /// Channel owner id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Channel username.
    pub username: String,
    /// Channel owner email.
    pub email: String,
    /// Channel owner full name.
    pub full_name: String,
    /// Avatar URL.
    pub avatar: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Number of users subscribed to this channel.
    pub subscribers_count: i64,
    /// Number of channels this channel's owner subscribes to.
    pub channels_subscribed_to_count: i64,
    /// Whether the viewer subscribes to this channel.
    pub is_subscribed: bool,
}

impl ChannelProfile {
    /// Build a profile from a user record and pre-computed counts.
    pub fn from_user(
        user: &User,
        subscribers_count: i64,
        channels_subscribed_to_count: i64,
        is_subscribed: bool,
    ) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
            subscribers_count,
            channels_subscribed_to_count,
            is_subscribed,
        }
    }
}
