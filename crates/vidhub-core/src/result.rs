//! Convenience result type alias for VidHub.

use crate::error::AppError;

/// A specialized `Result` type for VidHub operations.
pub type AppResult<T> = Result<T, AppError>;
