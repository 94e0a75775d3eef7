//! Session token manager: login, token issuance, rotation, revocation,
//! request authorization, and password change.
//!
//! Per principal the lifecycle is
//! `Anonymous -> Authenticated -> Authenticated' (rotated) -> Revoked`.
//! The stored refresh token is the single source of truth for which
//! refresh token is live.

use std::sync::Arc;

use tracing::{debug, info, warn};

use vidhub_core::config::auth::AuthConfig;
use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::types::UserId;
use vidhub_database::repositories::UserStore;
use vidhub_database::repositories::user::normalize_identifier;
use vidhub_entity::user::{PasswordHash, PublicUser, User};

use crate::jwt::{TokenPair, TokenSigner, TokenVerifier};
use crate::password::{PasswordHasher, PasswordValidator};

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthSession {
    /// The authenticated user, sanitized.
    pub user: PublicUser,
    /// Freshly issued tokens.
    pub tokens: TokenPair,
}

/// Issues, validates, rotates, and revokes paired access/refresh tokens.
#[derive(Clone)]
pub struct SessionTokenManager {
    users: Arc<dyn UserStore>,
    signer: Arc<TokenSigner>,
    verifier: Arc<TokenVerifier>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl std::fmt::Debug for SessionTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenManager")
            .field("signer", &self.signer)
            .field("validator", &self.validator)
            .finish()
    }
}

impl SessionTokenManager {
    /// Creates a manager over `users` with the default password hasher.
    pub fn new(config: &AuthConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            signer: Arc::new(TokenSigner::new(config)),
            verifier: Arc::new(TokenVerifier::new(config)),
            hasher: Arc::new(PasswordHasher::new()),
            validator: Arc::new(PasswordValidator::new(config)),
        }
    }

    /// Replaces the password hasher (e.g. with cheaper parameters).
    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = Arc::new(hasher);
        self
    }

    /// Validates a new password against policy and hashes it once.
    pub fn hash_new_password(&self, password: &str) -> AppResult<PasswordHash> {
        self.validator.validate(password)?;
        self.hasher.hash(password)
    }

    /// Verifies credentials and starts a session.
    ///
    /// `identifier` is a username or an email; it is trimmed and
    /// lowercased. Unknown identifier and wrong password are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, identifier: &str, password: &str) -> AppResult<AuthSession> {
        let identifier = normalize_identifier(identifier);
        if identifier.is_empty() {
            return Err(AppError::validation("Username or email is required"));
        }
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let Some(user) = self.users.find_by_identifier(&identifier).await? else {
            debug!("Login attempt for unknown identifier");
            return Err(AppError::invalid_credentials("Invalid user credentials"));
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: password mismatch");
            return Err(AppError::invalid_credentials("Invalid user credentials"));
        }

        let tokens = self.issue_for(&user).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(AuthSession {
            user: user.sanitized(),
            tokens,
        })
    }

    /// Signs a new pair for the principal and stores its refresh token.
    ///
    /// Unknown principal is `InvalidToken`.
    pub async fn issue_tokens(&self, user_id: UserId) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::invalid_token("Invalid token: unknown principal"))?;
        self.issue_for(&user).await
    }

    async fn issue_for(&self, user: &User) -> AppResult<TokenPair> {
        let tokens = self.signer.issue_pair(user)?;
        self.users
            .set_refresh_token(user.id, Some(&tokens.refresh_token))
            .await?;
        Ok(tokens)
    }

    /// Exchanges the live refresh token for a new pair.
    ///
    /// The presented token must verify and must equal the stored one.
    /// The overwrite is conditional on the stored value, so of two
    /// concurrent rotations of the same token at most one succeeds.
    pub async fn rotate_refresh_token(&self, presented: Option<&str>) -> AppResult<TokenPair> {
        let presented = presented
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Unauthorized request"))?;

        let claims = self.verifier.verify_refresh(presented)?;
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::invalid_token("Invalid refresh token"))?;

        if !user.holds_refresh_token(presented) {
            warn!(user_id = %user.id, "Superseded refresh token presented");
            return Err(AppError::token_replay("Refresh token is expired or used"));
        }

        let tokens = self.signer.issue_pair(&user)?;
        let swapped = self
            .users
            .replace_refresh_token(user.id, presented, &tokens.refresh_token)
            .await?;
        if !swapped {
            warn!(user_id = %user.id, "Refresh token rotated concurrently");
            return Err(AppError::token_replay("Refresh token is expired or used"));
        }

        debug!(user_id = %user.id, "Refresh token rotated");
        Ok(tokens)
    }

    /// Clears the stored refresh token. Every refresh token issued to the
    /// principal so far is dead afterwards.
    pub async fn revoke(&self, user_id: UserId) -> AppResult<()> {
        self.users.set_refresh_token(user_id, None).await?;
        info!(user_id = %user_id, "Refresh token revoked");
        Ok(())
    }

    /// Resolves an access token to the principal it asserts.
    pub async fn authorize(&self, access_token: Option<&str>) -> AppResult<PublicUser> {
        let token = access_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Unauthorized request"))?;

        let claims = self.verifier.verify_access(token)?;
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::invalid_token("Invalid access token"))?;
        Ok(user.sanitized())
    }

    /// Replaces the password after checking the current one.
    ///
    /// Only the hash column is written; the live refresh token survives.
    pub async fn change_password(
        &self,
        user_id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        if !self.hasher.verify(old_password, &user.password_hash)? {
            return Err(AppError::invalid_credentials("Invalid old password"));
        }
        self.validator.validate_not_same(old_password, new_password)?;
        let hash = self.hash_new_password(new_password)?;
        self.users.update_password(user_id, &hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
