//! # vidhub-storage
//!
//! Media host implementations for VidHub: Cloudinary signed uploads and a
//! local filesystem host for development.

pub mod manager;
pub mod providers;

pub use manager::create_media_host;
pub use providers::{CloudinaryMediaHost, LocalMediaHost};
