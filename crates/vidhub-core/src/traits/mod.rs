//! Core traits defined in `vidhub-core` and implemented by other crates.

pub mod media;

pub use media::{MediaHost, MediaUpload, UploadedMedia};
