//! Video publishing handler.

use axum::extract::{Multipart, State};

use vidhub_core::error::AppError;
use vidhub_entity::video::Video;
use vidhub_service::PublishVideo;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, MultipartForm};
use crate::state::AppState;

/// POST /api/v1/videos
pub async fn publish(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<ApiResponse<Video>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;

    let duration = match form.text("duration").trim() {
        "" => 0.0,
        raw => raw
            .parse::<f64>()
            .map_err(|_| AppError::validation(format!("Invalid duration: {raw}")))?,
    };
    let is_published = match form.text("isPublished").trim() {
        "" => true,
        raw => raw
            .parse::<bool>()
            .map_err(|_| AppError::validation(format!("Invalid isPublished flag: {raw}")))?,
    };

    let input = PublishVideo {
        title: form.text("title"),
        description: form.text("description"),
        duration,
        is_published,
        video_file: form.take_file("videoFile"),
        thumbnail: form.take_file("thumbnail"),
    };
    let video = state.video_service.publish(&auth, input).await?;

    Ok(ApiResponse::created(video, "Video published successfully"))
}
