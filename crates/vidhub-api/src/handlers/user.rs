//! User self-service handlers and the public channel profile.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};

use vidhub_entity::channel::{ChannelProfile, WatchHistoryEntry};
use vidhub_entity::user::PublicUser;
use vidhub_service::UpdateAccount;

use crate::dto::request::{ChangePasswordRequest, UpdateAccountRequest, validate_request};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser, MultipartForm};
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<PublicUser>, ApiError> {
    let user = state.user_service.current_user(&auth).await?;
    Ok(ApiResponse::ok(user, "User fetched successfully"))
}

/// POST /api/v1/users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Json(req) = body?;
    validate_request(&req)?;

    state
        .session_manager
        .change_password(auth.user_id, &req.old_password, &req.new_password)
        .await?;
    Ok(ApiResponse::message("Password changed successfully"))
}

/// PATCH /api/v1/users/account
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<ApiResponse<PublicUser>, ApiError> {
    let Json(req) = body?;
    validate_request(&req)?;

    let user = state
        .user_service
        .update_account(
            &auth,
            UpdateAccount {
                full_name: req.full_name,
                email: req.email,
            },
        )
        .await?;
    Ok(ApiResponse::ok(user, "Account details updated successfully"))
}

/// PATCH /api/v1/users/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<ApiResponse<PublicUser>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let file = form
        .take_file("avatar")
        .ok_or_else(|| vidhub_core::AppError::validation("Avatar file is missing"))?;

    let user = state.user_service.update_avatar(&auth, file).await?;
    Ok(ApiResponse::ok(user, "Avatar updated successfully"))
}

/// PATCH /api/v1/users/cover-image
pub async fn update_cover_image(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<ApiResponse<PublicUser>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let file = form
        .take_file("coverImage")
        .ok_or_else(|| vidhub_core::AppError::validation("Cover image file is missing"))?;

    let user = state.user_service.update_cover_image(&auth, file).await?;
    Ok(ApiResponse::ok(user, "Cover image updated successfully"))
}

/// GET /api/v1/users/channel/{username}
pub async fn channel_profile(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(username): Path<String>,
) -> Result<ApiResponse<ChannelProfile>, ApiError> {
    let profile = state
        .channel_service
        .channel_profile(&username, viewer.map(|v| v.user_id))
        .await?;
    Ok(ApiResponse::ok(profile, "User channel fetched successfully"))
}

/// GET /api/v1/users/history
pub async fn watch_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<WatchHistoryEntry>>, ApiError> {
    let history = state.channel_service.watch_history(&auth).await?;
    Ok(ApiResponse::ok(history, "Watch history fetched successfully"))
}
