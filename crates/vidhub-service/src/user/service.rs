//! Registration, profile reads, and account/avatar/cover updates.

use std::sync::Arc;

use tracing::{info, warn};
use validator::ValidateEmail;

use vidhub_auth::SessionTokenManager;
use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::traits::media::{MediaHost, MediaUpload};
use vidhub_database::repositories::UserStore;
use vidhub_database::repositories::user::normalize_identifier;
use vidhub_entity::user::{CreateUser, PublicUser, UpdateUser};

use super::account::{NewAccount, check_new_account};
use crate::context::RequestContext;

/// Input for [`UserService::register`].
#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Desired username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Avatar image. Required.
    pub avatar: Option<MediaUpload>,
    /// Cover image.
    pub cover_image: Option<MediaUpload>,
}

/// Input for [`UserService::update_account`].
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    /// New full name.
    pub full_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

/// Handles user registration and self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    media: Arc<dyn MediaHost>,
    sessions: Arc<SessionTokenManager>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        media: Arc<dyn MediaHost>,
        sessions: Arc<SessionTokenManager>,
    ) -> Self {
        Self {
            users,
            media,
            sessions,
        }
    }

    /// Registers a new principal.
    ///
    /// Checks run in order: required fields, email format, username charset,
    /// uniqueness, avatar presence, password policy. Media is uploaded only
    /// after all checks pass, and nothing is persisted if an upload fails.
    pub async fn register(&self, input: RegisterUser) -> AppResult<PublicUser> {
        let NewAccount {
            full_name,
            email,
            username,
        } = check_new_account(
            self.users.as_ref(),
            &input.full_name,
            &input.email,
            &input.username,
            &input.password,
        )
        .await?;

        let avatar = input
            .avatar
            .filter(|a| !a.data.is_empty())
            .ok_or_else(|| AppError::validation("Avatar is required"))?;
        let cover = match input.cover_image {
            Some(cover) if cover.data.is_empty() => {
                return Err(AppError::validation("Cover image file is empty"));
            }
            other => other,
        };
        let password_hash = self.sessions.hash_new_password(&input.password)?;

        let avatar = self.media.upload(avatar).await.inspect_err(|e| {
            warn!(username = %username, error = %e, "Avatar upload failed during registration");
        })?;
        let cover_image = match cover {
            Some(cover) => Some(self.media.upload(cover).await?.url),
            None => None,
        };

        let user = self
            .users
            .create(CreateUser {
                username,
                email,
                full_name,
                avatar: avatar.url,
                cover_image,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user.sanitized())
    }

    /// Returns the current user's public profile.
    pub async fn current_user(&self, ctx: &RequestContext) -> AppResult<PublicUser> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .map(|u| u.sanitized())
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates full name and/or email. At least one must be given.
    pub async fn update_account(
        &self,
        ctx: &RequestContext,
        req: UpdateAccount,
    ) -> AppResult<PublicUser> {
        let full_name = req
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let email = req
            .email
            .map(|e| normalize_identifier(&e))
            .filter(|e| !e.is_empty());

        if full_name.is_none() && email.is_none() {
            return Err(AppError::validation("At least one field is required"));
        }

        if let Some(email) = &email {
            if !email.validate_email() {
                return Err(AppError::validation("Email is invalid"));
            }
            if let Some(existing) = self.users.find_by_identifier(email).await? {
                if existing.id != ctx.user_id {
                    return Err(AppError::conflict("Email is already in use"));
                }
            }
        }

        let update = UpdateUser {
            full_name,
            email,
            ..UpdateUser::default()
        };
        let user = self.users.update_profile(ctx.user_id, &update).await?;
        info!(user_id = %ctx.user_id, "Account details updated");
        Ok(user.sanitized())
    }

    /// Uploads a new avatar and stores its URL.
    pub async fn update_avatar(
        &self,
        ctx: &RequestContext,
        file: MediaUpload,
    ) -> AppResult<PublicUser> {
        if file.data.is_empty() {
            return Err(AppError::validation("Avatar file is missing"));
        }
        let uploaded = self.media.upload(file).await?;
        let update = UpdateUser {
            avatar: Some(uploaded.url),
            ..UpdateUser::default()
        };
        let user = self.users.update_profile(ctx.user_id, &update).await?;
        info!(user_id = %ctx.user_id, "Avatar updated");
        Ok(user.sanitized())
    }

    /// Uploads a new cover image and stores its URL.
    pub async fn update_cover_image(
        &self,
        ctx: &RequestContext,
        file: MediaUpload,
    ) -> AppResult<PublicUser> {
        if file.data.is_empty() {
            return Err(AppError::validation("Cover image file is missing"));
        }
        let uploaded = self.media.upload(file).await?;
        let update = UpdateUser {
            cover_image: Some(uploaded.url),
            ..UpdateUser::default()
        };
        let user = self.users.update_profile(ctx.user_id, &update).await?;
        info!(user_id = %ctx.user_id, "Cover image updated");
        Ok(user.sanitized())
    }
}
