//! # vidhub-core
//!
//! Core crate for VidHub. Contains configuration schemas, typed
//! identifiers, pagination types, the media host trait, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other VidHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
