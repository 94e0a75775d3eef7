//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vidhub_core::types::UserId;
use vidhub_entity::user::PublicUser;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer after the access token is authorized and
/// passed into service methods so that every operation knows who is
/// acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The username at authorization time.
    pub username: String,
    /// The email at authorization time.
    pub email: String,
    /// IP address of the request origin, when known.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for an authorized user.
    pub fn new(user: &PublicUser, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }
}
