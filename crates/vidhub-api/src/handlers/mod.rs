//! Route handlers organized by domain.

pub mod auth;
pub mod channel;
pub mod health;
pub mod user;
pub mod video;
