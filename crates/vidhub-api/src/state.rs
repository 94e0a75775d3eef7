//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use vidhub_auth::SessionTokenManager;
use vidhub_core::config::AppConfig;
use vidhub_core::traits::media::MediaHost;
use vidhub_database::Stores;
use vidhub_service::{ChannelService, UserService, VideoService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the state was built
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Credential, video, and subscription stores
    pub stores: Stores,
    /// Remote media host
    pub media: Arc<dyn MediaHost>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token manager
    pub session_manager: Arc<SessionTokenManager>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and profile service
    pub user_service: Arc<UserService>,
    /// Channel, subscription, and watch history service
    pub channel_service: Arc<ChannelService>,
    /// Video publishing service
    pub video_service: Arc<VideoService>,
}

impl AppState {
    /// Wires services over the given stores, media host, and session manager.
    pub fn new(
        config: Arc<AppConfig>,
        stores: Stores,
        media: Arc<dyn MediaHost>,
        session_manager: SessionTokenManager,
    ) -> Self {
        let session_manager = Arc::new(session_manager);
        let user_service = Arc::new(UserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&media),
            Arc::clone(&session_manager),
        ));
        let channel_service = Arc::new(ChannelService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.videos),
            Arc::clone(&stores.subscriptions),
        ));
        let video_service = Arc::new(VideoService::new(
            Arc::clone(&stores.videos),
            Arc::clone(&media),
        ));

        Self {
            config,
            started_at: Instant::now(),
            stores,
            media,
            session_manager,
            user_service,
            channel_service,
            video_service,
        }
    }
}
