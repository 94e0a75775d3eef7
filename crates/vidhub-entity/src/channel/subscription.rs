//! Subscription entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidhub_core::types::UserId;

/// A subscriber following a channel. The pair is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// The following user.
    #[sqlx(rename = "subscriber_id")]
    pub subscriber: UserId,
    /// The followed channel.
    #[sqlx(rename = "channel_id")]
    pub channel: UserId,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
}
