//! Route definitions for the VidHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api/v1`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes();
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(channel_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration, login, logout, refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(handlers::auth::register))
        .route("/users/login", post(handlers::auth::login))
        .route("/users/logout", post(handlers::auth::logout))
        .route("/users/refresh-token", post(handlers::auth::refresh_token))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::current_user))
        .route("/users/change-password", post(handlers::user::change_password))
        .route("/users/account", patch(handlers::user::update_account))
        .route("/users/avatar", patch(handlers::user::update_avatar))
        .route("/users/cover-image", patch(handlers::user::update_cover_image))
        .route("/users/channel/{username}", get(handlers::user::channel_profile))
        .route("/users/history", get(handlers::user::watch_history))
}

/// Subscriptions, publishing, and watch history writes
fn channel_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions/{channel_id}",
            post(handlers::channel::subscribe).delete(handlers::channel::unsubscribe),
        )
        .route("/videos", post(handlers::video::publish))
        .route("/videos/{video_id}/watch", post(handlers::channel::record_watch))
}
