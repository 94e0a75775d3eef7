//! Channel profiles, subscriptions, and watch history.

pub mod service;

pub use service::ChannelService;
