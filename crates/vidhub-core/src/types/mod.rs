//! Shared value types.

pub mod id;
pub mod pagination;

pub use id::{UserId, VideoId};
pub use pagination::{PageRequest, PageResponse};
