//! # vidhub-api
//!
//! HTTP API layer for VidHub built on Axum.
//!
//! Provides the `/api/v1` REST endpoints, middleware (CORS, request
//! logging), extractors for the authenticated principal, response
//! envelopes, cookie handling, and the mapping from [`AppError`] kinds to
//! HTTP status codes.
//!
//! [`AppError`]: vidhub_core::error::AppError

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
