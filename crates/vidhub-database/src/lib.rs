//! # vidhub-database
//!
//! The credential store. Defines the [`UserStore`], [`VideoStore`] and
//! [`SubscriptionStore`] contracts, implements them for PostgreSQL (sqlx)
//! and in memory (dashmap), and manages the connection pool and migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

use std::sync::Arc;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{
    SubscriptionRepository, SubscriptionStore, UserRepository, UserStore, VideoRepository,
    VideoStore,
};

/// The set of stores a running server works against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User (principal) store.
    pub users: Arc<dyn UserStore>,
    /// Video and watch history store.
    pub videos: Arc<dyn VideoStore>,
    /// Subscription and channel profile store.
    pub subscriptions: Arc<dyn SubscriptionStore>,
}

impl Stores {
    /// Stores backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            videos: Arc::new(VideoRepository::new(pg.clone())),
            subscriptions: Arc::new(SubscriptionRepository::new(pg)),
        }
    }

    /// Stores backed by a single shared in-memory store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            videos: store.clone(),
            subscriptions: store,
        }
    }
}
