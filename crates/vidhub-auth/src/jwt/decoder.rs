//! Token verification.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::de::DeserializeOwned;

use vidhub_core::config::auth::AuthConfig;
use vidhub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims, TokenClaims, TokenType};

/// Validates signature, expiry, and token type.
///
/// Every failure is reported as `InvalidToken` with the reason in the
/// message.
#[derive(Clone)]
pub struct TokenVerifier {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            access_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies an access token.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.verify(token, &self.access_key, TokenType::Access)
    }

    /// Verifies a refresh token.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AppError> {
        self.verify(token, &self.refresh_key, TokenType::Refresh)
    }

    fn verify<C>(&self, token: &str, key: &DecodingKey, expected: TokenType) -> Result<C, AppError>
    where
        C: DeserializeOwned + TokenClaims,
    {
        let data = decode::<C>(token, key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                JwtErrorKind::ExpiredSignature => "token has expired".to_string(),
                JwtErrorKind::InvalidSignature => "bad signature".to_string(),
                JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) => {
                    "malformed token".to_string()
                }
                JwtErrorKind::Json(_) | JwtErrorKind::MissingRequiredClaim(_) => {
                    "unexpected claims".to_string()
                }
                other => format!("{other:?}"),
            };
            AppError::invalid_token(format!("Invalid {expected} token: {reason}"))
        })?;

        if data.claims.token_type() != expected {
            return Err(AppError::invalid_token(format!(
                "Invalid {expected} token: wrong token type"
            )));
        }
        Ok(data.claims)
    }
}
