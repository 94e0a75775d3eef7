//! In-memory implementation of every store contract.
//!
//! Backed by `DashMap`s. Username and email uniqueness is enforced by
//! claiming index entries through the entry API, and refresh token
//! rotation holds the user's shard lock for the compare and the write.
//! Used for development (`database.provider = "memory"`) and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::types::pagination::{PageRequest, PageResponse};
use vidhub_core::types::{UserId, VideoId};
use vidhub_entity::channel::{
    ChannelProfile, OwnerSummary, Subscription, VideoSummary, WatchHistoryEntry,
};
use vidhub_entity::user::{CreateUser, PasswordHash, UpdateUser, User};
use vidhub_entity::video::{CreateVideo, Video};

use crate::repositories::user::normalize_identifier;
use crate::repositories::{SubscriptionStore, UserStore, VideoStore};

/// A history row plus an insertion sequence that breaks timestamp ties.
#[derive(Debug, Clone, Copy)]
struct WatchMark {
    watched_at: DateTime<Utc>,
    seq: u64,
}

/// Process-local store for users, videos, subscriptions, and history.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    by_username: DashMap<String, UserId>,
    by_email: DashMap<String, UserId>,
    videos: DashMap<VideoId, Video>,
    subscriptions: DashMap<(UserId, UserId), Subscription>,
    history: DashMap<(UserId, VideoId), WatchMark>,
    watch_seq: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of stored videos.
    pub fn video_count(&self) -> usize {
        self.videos.len()
    }

    fn lookup(&self, index: &DashMap<String, UserId>, key: &str) -> Option<User> {
        let id = *index.get(&normalize_identifier(key))?;
        self.users.get(&id).map(|u| u.value().clone())
    }

    /// Claim an index key for `id`. Fails if another user holds it.
    fn claim(index: &DashMap<String, UserId>, key: String, id: UserId) -> bool {
        match index.entry(key) {
            Entry::Occupied(e) => *e.get() == id,
            Entry::Vacant(e) => {
                e.insert(id);
                true
            }
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        Ok(self
            .lookup(&self.by_email, identifier)
            .or_else(|| self.lookup(&self.by_username, identifier)))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.lookup(&self.by_username, username))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.lookup(&self.by_email, email))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let id = UserId::new();
        let username = normalize_identifier(&data.username);
        let email = normalize_identifier(&data.email);

        if !Self::claim(&self.by_username, username.clone(), id) {
            return Err(AppError::conflict("User with username already exists"));
        }
        if !Self::claim(&self.by_email, email.clone(), id) {
            self.by_username.remove(&username);
            return Err(AppError::conflict("User with email already exists"));
        }

        let now = Utc::now();
        let user = User {
            id,
            username,
            email,
            full_name: data.full_name.trim().to_string(),
            avatar: data.avatar,
            cover_image: data.cover_image,
            password_hash: data.password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        debug!(user_id = %id, "User inserted into memory store");
        Ok(user)
    }

    async fn update_profile(&self, id: UserId, data: &UpdateUser) -> AppResult<User> {
        let old_email = self
            .users
            .get(&id)
            .map(|u| u.email.clone())
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        let mut data = data.clone();
        if let Some(email) = data.email.as_mut() {
            *email = normalize_identifier(email);
            if *email != old_email {
                if !Self::claim(&self.by_email, email.clone(), id) {
                    return Err(AppError::conflict("User with email already exists"));
                }
                self.by_email.remove(&old_email);
            }
        }
        if let Some(full_name) = data.full_name.as_mut() {
            *full_name = full_name.trim().to_string();
        }

        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        data.apply(&mut user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password(&self, id: UserId, hash: &PasswordHash) -> AppResult<()> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.password_hash = hash.clone();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> AppResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.refresh_token = token.filter(|t| !t.is_empty()).map(str::to_string);
        }
        Ok(())
    }

    async fn replace_refresh_token(
        &self,
        id: UserId,
        expected: &str,
        new_token: &str,
    ) -> AppResult<bool> {
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(false);
        };
        if !user.holds_refresh_token(expected) {
            return Ok(false);
        }
        user.refresh_token = Some(new_token.to_string());
        Ok(true)
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = users.len() as u64;
        let items = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }
}

#[async_trait]
impl VideoStore for MemoryStore {
    async fn create(&self, data: CreateVideo) -> AppResult<Video> {
        let now = Utc::now();
        let video = Video {
            id: VideoId::new(),
            owner: data.owner,
            video_file: data.video_file,
            thumbnail: data.thumbnail,
            title: data.title,
            description: data.description,
            duration: data.duration,
            views: 0,
            is_published: data.is_published,
            created_at: now,
            updated_at: now,
        };
        self.videos.insert(video.id, video.clone());
        Ok(video)
    }

    async fn find_by_id(&self, id: VideoId) -> AppResult<Option<Video>> {
        Ok(self.videos.get(&id).map(|v| v.value().clone()))
    }

    async fn record_watch(&self, user: UserId, video: VideoId) -> AppResult<()> {
        {
            let mut entry = self
                .videos
                .get_mut(&video)
                .ok_or_else(|| AppError::not_found(format!("Video {video} not found")))?;
            entry.views += 1;
        }
        let mark = WatchMark {
            watched_at: Utc::now(),
            seq: self.watch_seq.fetch_add(1, Ordering::Relaxed),
        };
        self.history.insert((user, video), mark);
        Ok(())
    }

    async fn watch_history(&self, user: UserId) -> AppResult<Vec<WatchHistoryEntry>> {
        let mut marks: Vec<(VideoId, WatchMark)> = self
            .history
            .iter()
            .filter(|e| e.key().0 == user)
            .map(|e| (e.key().1, *e.value()))
            .collect();
        marks.sort_by(|a, b| b.1.seq.cmp(&a.1.seq));

        let entries = marks
            .into_iter()
            .filter_map(|(video_id, mark)| {
                let video = self.videos.get(&video_id)?.value().clone();
                let owner = self.users.get(&video.owner)?;
                Some(WatchHistoryEntry {
                    video: VideoSummary::new(&video, OwnerSummary::from(owner.value())),
                    watched_at: mark.watched_at,
                })
            })
            .collect();
        Ok(entries)
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn subscribe(&self, subscriber: UserId, channel: UserId) -> AppResult<bool> {
        match self.subscriptions.entry((subscriber, channel)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(e) => {
                e.insert(Subscription {
                    subscriber,
                    channel,
                    created_at: Utc::now(),
                });
                Ok(true)
            }
        }
    }

    async fn unsubscribe(&self, subscriber: UserId, channel: UserId) -> AppResult<bool> {
        Ok(self.subscriptions.remove(&(subscriber, channel)).is_some())
    }

    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<UserId>,
    ) -> AppResult<Option<ChannelProfile>> {
        let Some(user) = self.lookup(&self.by_username, username) else {
            return Ok(None);
        };

        let mut subscribers = 0i64;
        let mut subscribed_to = 0i64;
        let mut is_subscribed = false;
        for sub in self.subscriptions.iter() {
            let (s, c) = *sub.key();
            if c == user.id {
                subscribers += 1;
                if Some(s) == viewer {
                    is_subscribed = true;
                }
            }
            if s == user.id {
                subscribed_to += 1;
            }
        }

        Ok(Some(ChannelProfile::from_user(
            &user,
            subscribers,
            subscribed_to,
            is_subscribed,
        )))
    }
}
