//! Token signing with separate access and refresh secrets.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use vidhub_core::config::auth::{AuthConfig, MAX_ACCESS_TTL_MINUTES, MAX_REFRESH_TTL_HOURS};
use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::types::UserId;
use vidhub_entity::user::User;

use super::claims::{AccessClaims, RefreshClaims, TokenType};

/// A freshly issued access + refresh token pair.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Creates signed HS256 tokens.
#[derive(Clone)]
pub struct TokenSigner {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a new signer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl: Duration::minutes(
                config.access_token_ttl_minutes.min(MAX_ACCESS_TTL_MINUTES) as i64,
            ),
            refresh_ttl: Duration::hours(
                config.refresh_token_ttl_hours.min(MAX_REFRESH_TTL_HOURS) as i64,
            ),
        }
    }

    /// Signs an access token asserting the user's identity.
    pub fn sign_access(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + self.access_ttl;
        let claims = AccessClaims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        };
        Ok((sign(&claims, &self.access_key, TokenType::Access)?, exp))
    }

    /// Signs a refresh token for the user.
    pub fn sign_refresh(&self, user_id: UserId) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + self.refresh_ttl;
        let claims = RefreshClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenType::Refresh,
        };
        Ok((sign(&claims, &self.refresh_key, TokenType::Refresh)?, exp))
    }

    /// Signs both tokens for the user.
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self.sign_access(user)?;
        let (refresh_token, refresh_expires_at) = self.sign_refresh(user.id)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }
}

/// Encode `claims` with `key`. An encoder error or an empty result is a
/// generation failure.
fn sign<C: Serialize>(claims: &C, key: &EncodingKey, kind: TokenType) -> Result<String, AppError> {
    let token = encode(&Header::default(), claims, key).map_err(|e| {
        AppError::with_source(
            ErrorKind::TokenGenerationFailed,
            format!("Failed to sign {kind} token"),
            e,
        )
    })?;
    if token.is_empty() {
        return Err(AppError::token_generation(format!(
            "Signing produced an empty {kind} token"
        )));
    }
    Ok(token)
}
