//! # vidhub-entity
//!
//! Domain entity models for VidHub. Every struct in this crate represents
//! a database table row or a domain value object. Row types additionally
//! derive `sqlx::FromRow`.

pub mod channel;
pub mod user;
pub mod video;
