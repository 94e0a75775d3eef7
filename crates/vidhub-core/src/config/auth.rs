//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted access token lifetime: one year.
pub const MAX_ACCESS_TTL_MINUTES: u64 = 60 * 24 * 365;

/// Longest accepted refresh token lifetime: ten years.
pub const MAX_REFRESH_TTL_HOURS: u64 = 24 * 365 * 10;

/// Token signing and password policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret for access tokens.
    #[serde(default)]
    pub access_token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// HMAC-SHA256 secret for refresh tokens. Must differ from the access secret.
    #[serde(default)]
    pub refresh_token_secret: String,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_hours: u64,
    /// Clock skew tolerated when checking `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Reject weak passwords using a zxcvbn score gate.
    #[serde(default)]
    pub enforce_password_strength: bool,
    /// Mark token cookies `Secure`. Disable only for plain-HTTP development.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Reject configurations that would make tokens forgeable or interchangeable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_token_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.access_token_secret is empty"));
        }
        if self.refresh_token_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.refresh_token_secret is empty",
            ));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(AppError::configuration(
                "auth.access_token_secret and auth.refresh_token_secret must differ",
            ));
        }
        if self.access_token_ttl_minutes == 0 || self.refresh_token_ttl_hours == 0 {
            return Err(AppError::configuration("auth token TTLs must be positive"));
        }
        if self.access_token_ttl_minutes > MAX_ACCESS_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_minutes must be at most {MAX_ACCESS_TTL_MINUTES}"
            )));
        }
        if self.refresh_token_ttl_hours > MAX_REFRESH_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_hours must be at most {MAX_REFRESH_TTL_HOURS}"
            )));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::new(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_secret: String::new(),
            refresh_token_ttl_hours: default_refresh_ttl(),
            leeway_seconds: default_leeway(),
            password_min_length: default_password_min(),
            enforce_password_strength: false,
            cookie_secure: default_true(),
        }
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    240
}

fn default_leeway() -> u64 {
    5
}

fn default_password_min() -> usize {
    1
}

fn default_true() -> bool {
    true
}
