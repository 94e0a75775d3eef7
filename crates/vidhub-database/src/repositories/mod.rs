//! Store contracts and their PostgreSQL implementations.

pub mod subscription;
pub mod user;
pub mod video;

pub use subscription::{SubscriptionRepository, SubscriptionStore};
pub use user::{UserRepository, UserStore};
pub use video::{VideoRepository, VideoStore};

use vidhub_core::error::{AppError, ErrorKind};

/// Wrap a sqlx error as a database error with context.
pub(crate) fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
