//! Custom Axum extractors and request parsing helpers.

pub mod auth;
pub mod multipart;
pub mod path;

pub use auth::{AuthUser, MaybeAuthUser};
pub use multipart::MultipartForm;
pub use path::parse_id;
