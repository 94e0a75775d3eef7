//! Subscription and watch handlers.

use axum::extract::{Path, State};

use vidhub_core::types::{UserId, VideoId};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

/// POST /api/v1/subscriptions/{channel_id}
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let channel: UserId = parse_id(&channel_id, "channel")?;
    state.channel_service.subscribe(&auth, channel).await?;
    Ok(ApiResponse::message("Subscribed successfully"))
}

/// DELETE /api/v1/subscriptions/{channel_id}
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let channel: UserId = parse_id(&channel_id, "channel")?;
    state.channel_service.unsubscribe(&auth, channel).await?;
    Ok(ApiResponse::message("Unsubscribed successfully"))
}

/// POST /api/v1/videos/{video_id}/watch
pub async fn record_watch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let video: VideoId = parse_id(&video_id, "video")?;
    state.channel_service.record_watch(&auth, video).await?;
    Ok(ApiResponse::message("Watch recorded"))
}
