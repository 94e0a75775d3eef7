//! Video and watch history store contract and PostgreSQL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::types::{UserId, VideoId};
use vidhub_entity::channel::{OwnerSummary, VideoSummary, WatchHistoryEntry};
use vidhub_entity::video::{CreateVideo, Video};

use super::db_err;

/// Persistence contract for videos and per-user watch history.
#[async_trait]
pub trait VideoStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new video.
    async fn create(&self, data: CreateVideo) -> AppResult<Video>;

    /// Find a video by primary key.
    async fn find_by_id(&self, id: VideoId) -> AppResult<Option<Video>>;

    /// Upsert the history row for `(user, video)` and bump the view count.
    ///
    /// Unknown video is `NotFound`.
    async fn record_watch(&self, user: UserId, video: VideoId) -> AppResult<()>;

    /// The user's history joined with each video's owner, newest first.
    async fn watch_history(&self, user: UserId) -> AppResult<Vec<WatchHistoryEntry>>;
}

/// PostgreSQL-backed [`VideoStore`].
#[derive(Debug, Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    /// Create a new video repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat row produced by the history join.
#[derive(Debug, FromRow)]
struct WatchHistoryRow {
    id: VideoId,
    title: String,
    description: String,
    thumbnail: String,
    video_file: String,
    duration: f64,
    views: i64,
    owner_id: UserId,
    owner_username: String,
    owner_full_name: String,
    owner_avatar: String,
    watched_at: DateTime<Utc>,
}

impl From<WatchHistoryRow> for WatchHistoryEntry {
    fn from(row: WatchHistoryRow) -> Self {
        Self {
            video: VideoSummary {
                id: row.id,
                title: row.title,
                description: row.description,
                thumbnail: row.thumbnail,
                video_file: row.video_file,
                duration: row.duration,
                views: row.views,
                owner: OwnerSummary {
                    id: row.owner_id,
                    username: row.owner_username,
                    full_name: row.owner_full_name,
                    avatar: row.owner_avatar,
                },
            },
            watched_at: row.watched_at,
        }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    async fn create(&self, data: CreateVideo) -> AppResult<Video> {
        sqlx::query_as::<_, Video>(
            "INSERT INTO videos (id, owner_id, video_file, thumbnail, title, description, duration, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(VideoId::new())
        .bind(data.owner)
        .bind(&data.video_file)
        .bind(&data.thumbnail)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.duration)
        .bind(data.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to create video"))
    }

    async fn find_by_id(&self, id: VideoId) -> AppResult<Option<Video>> {
        sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find video by id"))
    }

    async fn record_watch(&self, user: UserId, video: VideoId) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let bumped = sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(video)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to increment views"))?;
        if bumped.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Video {video} not found")));
        }

        sqlx::query(
            "INSERT INTO watch_history (user_id, video_id, watched_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (user_id, video_id) DO UPDATE SET watched_at = EXCLUDED.watched_at",
        )
        .bind(user)
        .bind(video)
        .execute(&mut *tx)
        .await
        .map_err(db_err("Failed to record watch"))?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit watch record"))
    }

    async fn watch_history(&self, user: UserId) -> AppResult<Vec<WatchHistoryEntry>> {
        let rows = sqlx::query_as::<_, WatchHistoryRow>(
            "SELECT v.id, v.title, v.description, v.thumbnail, v.video_file, v.duration, v.views, \
                    u.id AS owner_id, u.username AS owner_username, \
                    u.full_name AS owner_full_name, u.avatar AS owner_avatar, \
                    h.watched_at \
             FROM watch_history h \
             JOIN videos v ON v.id = h.video_id \
             JOIN users u ON u.id = v.owner_id \
             WHERE h.user_id = $1 \
             ORDER BY h.watched_at DESC",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to load watch history"))?;

        Ok(rows.into_iter().map(WatchHistoryEntry::from).collect())
    }
}
