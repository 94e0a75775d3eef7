//! Auth handlers: register, login, logout, refresh-token.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum_extra::extract::cookie::CookieJar;

use vidhub_entity::user::PublicUser;
use vidhub_service::RegisterUser;

use crate::cookies::{REFRESH_TOKEN_COOKIE, clear_session_cookies, cookie_value, set_session_cookies};
use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LoginResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, MultipartForm};
use crate::state::AppState;

/// POST /api/v1/users/register
pub async fn register(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<ApiResponse<PublicUser>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;

    let input = RegisterUser {
        full_name: form.text("fullName"),
        email: form.text("email"),
        username: form.text("username"),
        password: form.text("password"),
        avatar: form.take_file("avatar"),
        cover_image: form.take_file("coverImage"),
    };
    let user = state.user_service.register(input).await?;

    Ok(ApiResponse::created(user, "User registered successfully"))
}

/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiResponse<LoginResponse>), ApiError> {
    let Json(req) = body?;

    let session = state
        .session_manager
        .authenticate(req.identifier(), &req.password)
        .await?;

    let jar = set_session_cookies(jar, &session.tokens, state.config.auth.cookie_secure);
    let payload = LoginResponse {
        user: session.user,
        access_token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
    };
    Ok((jar, ApiResponse::ok(payload, "User logged in successfully")))
}

/// POST /api/v1/users/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<(CookieJar, ApiResponse<()>), ApiError> {
    state.session_manager.revoke(auth.user_id).await?;
    Ok((
        clear_session_cookies(jar),
        ApiResponse::message("User logged out"),
    ))
}

/// POST /api/v1/users/refresh-token
///
/// The `refreshToken` cookie wins over the JSON body field.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiResponse<TokenResponse>), ApiError> {
    let presented = cookie_value(&jar, REFRESH_TOKEN_COOKIE)
        .or_else(|| body.ok().and_then(|Json(req)| req.refresh_token));

    let tokens = state
        .session_manager
        .rotate_refresh_token(presented.as_deref())
        .await?;

    let payload = TokenResponse::from(&tokens);
    let jar = set_session_cookies(jar, &tokens, state.config.auth.cookie_secure);
    Ok((jar, ApiResponse::ok(payload, "Access token refreshed")))
}
