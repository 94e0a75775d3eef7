//! Media host providers.

pub mod cloudinary;
pub mod local;

pub use cloudinary::CloudinaryMediaHost;
pub use local::LocalMediaHost;
