//! Channel, subscription, and watch history entities.

pub mod history;
pub mod profile;
pub mod subscription;

pub use history::{OwnerSummary, VideoSummary, WatchHistoryEntry};
pub use profile::ChannelProfile;
pub use subscription::Subscription;
