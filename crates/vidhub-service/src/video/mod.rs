//! Publishing videos to a channel.

pub mod service;

pub use service::{PublishVideo, VideoService};
