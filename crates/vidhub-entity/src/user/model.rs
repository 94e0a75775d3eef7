//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidhub_core::types::UserId;

use super::password::PasswordHash;

/// A registered user (principal) in the VidHub system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name, stored lowercased.
    pub username: String,
    /// Unique email address, stored lowercased.
    pub email: String,
    /// Human-readable full name.
    pub full_name: String,
    /// Avatar URL on the media host.
    pub avatar: String,
    /// Cover image URL on the media host.
    pub cover_image: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: PasswordHash,
    /// The single live refresh token, `None` when revoked or never issued.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Project to the caller-facing view without secrets.
    pub fn sanitized(&self) -> PublicUser {
        PublicUser::from(self.clone())
    }

    /// Whether `presented` is exactly the stored refresh token.
    pub fn holds_refresh_token(&self, presented: &str) -> bool {
        self.refresh_token.as_deref() == Some(presented)
    }
}

/// A user with the password hash and refresh token removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// User identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Full name.
    pub full_name: String,
    /// Avatar URL.
    pub avatar: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            cover_image: user.cover_image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Username (normalized by the caller).
    pub username: String,
    /// Email (normalized by the caller).
    pub email: String,
    /// Full name.
    pub full_name: String,
    /// Avatar URL.
    pub avatar: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Hash produced by the password hasher.
    pub password_hash: PasswordHash,
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New full name.
    pub full_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New avatar URL.
    pub avatar: Option<String>,
    /// New cover image URL.
    pub cover_image: Option<String>,
}

impl UpdateUser {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.cover_image.is_none()
    }

    /// Apply the update to a user record in place.
    pub fn apply(&self, user: &mut User) {
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = avatar.clone();
        }
        if let Some(cover) = &self.cover_image {
            user.cover_image = Some(cover.clone());
        }
    }
}
