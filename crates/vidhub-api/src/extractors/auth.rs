//! `AuthUser` extractor: pulls the access token from the `accessToken`
//! cookie or the Authorization header, authorizes it, and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use vidhub_service::RequestContext;

use crate::cookies::{ACCESS_TOKEN_COOKIE, cookie_value};
use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Like [`AuthUser`] but absent when no token was presented.
///
/// A token that is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

/// Cookie first, then `Authorization: Bearer <token>`.
fn access_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    cookie_value(&jar, ACCESS_TOKEN_COOKIE).or_else(|| {
        parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

async fn authorize(
    parts: &Parts,
    state: &AppState,
    token: Option<&str>,
) -> Result<RequestContext, ApiError> {
    let user = state.session_manager.authorize(token).await?;

    let ip_address = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    let user_agent = parts
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    Ok(RequestContext::new(&user, ip_address, user_agent))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token(parts);
        Ok(AuthUser(authorize(parts, state, token.as_deref()).await?))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match access_token(parts) {
            Some(token) => Ok(MaybeAuthUser(Some(
                authorize(parts, state, Some(&token)).await?,
            ))),
            None => Ok(MaybeAuthUser(None)),
        }
    }
}
