//! Channel profiles, subscriptions, and watch history.

use std::sync::Arc;

use tracing::{debug, info};

use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::types::{UserId, VideoId};
use vidhub_database::repositories::user::normalize_identifier;
use vidhub_database::repositories::{SubscriptionStore, UserStore, VideoStore};
use vidhub_entity::channel::{ChannelProfile, WatchHistoryEntry};

use crate::context::RequestContext;

/// Channel-facing operations for authenticated and anonymous viewers.
#[derive(Debug, Clone)]
pub struct ChannelService {
    users: Arc<dyn UserStore>,
    videos: Arc<dyn VideoStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
}

impl ChannelService {
    /// Creates a new channel service.
    pub fn new(
        users: Arc<dyn UserStore>,
        videos: Arc<dyn VideoStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
    ) -> Self {
        Self {
            users,
            videos,
            subscriptions,
        }
    }

    /// Aggregated profile of the channel owned by `username`.
    pub async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<UserId>,
    ) -> AppResult<ChannelProfile> {
        let username = normalize_identifier(username);
        if username.is_empty() {
            return Err(AppError::validation("Username is missing"));
        }
        self.subscriptions
            .channel_profile(&username, viewer)
            .await?
            .ok_or_else(|| AppError::not_found("Channel does not exist"))
    }

    /// Subscribes the caller to `channel`. Repeating is a no-op.
    pub async fn subscribe(&self, ctx: &RequestContext, channel: UserId) -> AppResult<()> {
        self.ensure_channel(ctx, channel).await?;
        if self.subscriptions.subscribe(ctx.user_id, channel).await? {
            info!(subscriber = %ctx.user_id, channel = %channel, "Subscribed to channel");
        } else {
            debug!(subscriber = %ctx.user_id, channel = %channel, "Already subscribed");
        }
        Ok(())
    }

    /// Removes the caller's subscription to `channel`, if any.
    pub async fn unsubscribe(&self, ctx: &RequestContext, channel: UserId) -> AppResult<()> {
        self.ensure_channel(ctx, channel).await?;
        if self.subscriptions.unsubscribe(ctx.user_id, channel).await? {
            info!(subscriber = %ctx.user_id, channel = %channel, "Unsubscribed from channel");
        }
        Ok(())
    }

    /// Records that the caller watched `video`.
    pub async fn record_watch(&self, ctx: &RequestContext, video: VideoId) -> AppResult<()> {
        self.videos.record_watch(ctx.user_id, video).await?;
        debug!(user_id = %ctx.user_id, video_id = %video, "Watch recorded");
        Ok(())
    }

    /// The caller's watch history, newest first.
    pub async fn watch_history(&self, ctx: &RequestContext) -> AppResult<Vec<WatchHistoryEntry>> {
        self.videos.watch_history(ctx.user_id).await
    }

    async fn ensure_channel(&self, ctx: &RequestContext, channel: UserId) -> AppResult<()> {
        if ctx.user_id == channel {
            return Err(AppError::validation("Cannot subscribe to your own channel"));
        }
        if self.users.find_by_id(channel).await?.is_none() {
            return Err(AppError::not_found("Channel does not exist"));
        }
        Ok(())
    }
}
