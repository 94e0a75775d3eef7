//! Subscription store contract and PostgreSQL repository.

use async_trait::async_trait;
use sqlx::PgPool;

use vidhub_core::result::AppResult;
use vidhub_core::types::UserId;
use vidhub_entity::channel::ChannelProfile;

use super::db_err;
use super::user::normalize_identifier;

/// Persistence contract for channel subscriptions.
#[async_trait]
pub trait SubscriptionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Subscribe. Returns `false` when the subscription already existed.
    async fn subscribe(&self, subscriber: UserId, channel: UserId) -> AppResult<bool>;

    /// Unsubscribe. Returns `false` when there was nothing to remove.
    async fn unsubscribe(&self, subscriber: UserId, channel: UserId) -> AppResult<bool>;

    /// Aggregate the channel profile for `username` as seen by `viewer`.
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<UserId>,
    ) -> AppResult<Option<ChannelProfile>>;
}

/// PostgreSQL-backed [`SubscriptionStore`].
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn subscribe(&self, subscriber: UserId, channel: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO subscriptions (subscriber_id, channel_id) VALUES ($1, $2) \
             ON CONFLICT (subscriber_id, channel_id) DO NOTHING",
        )
        .bind(subscriber)
        .bind(channel)
        .execute(&self.pool)
        .await
        .map_err(db_err("Failed to subscribe"))?;
        Ok(result.rows_affected() == 1)
    }

    async fn unsubscribe(&self, subscriber: UserId, channel: UserId) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2")
                .bind(subscriber)
                .bind(channel)
                .execute(&self.pool)
                .await
                .map_err(db_err("Failed to unsubscribe"))?;
        Ok(result.rows_affected() == 1)
    }

    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<UserId>,
    ) -> AppResult<Option<ChannelProfile>> {
        sqlx::query_as::<_, ChannelProfile>(
            "SELECT u.id, u.username, u.email, u.full_name, u.avatar, u.cover_image, \
                (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS subscribers_count, \
                (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id) AS channels_subscribed_to_count, \
                EXISTS (SELECT 1 FROM subscriptions s WHERE s.channel_id = u.id AND s.subscriber_id = $2) AS is_subscribed \
             FROM users u \
             WHERE u.username = $1",
        )
        .bind(normalize_identifier(username))
        .bind(viewer)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to load channel profile"))
    }
}
