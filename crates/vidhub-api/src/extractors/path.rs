//! Typed path parameter helpers.

use std::str::FromStr;

use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;

/// Parses an identifier from a path segment.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid {what} id: {raw}")))
}
