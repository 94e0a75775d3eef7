//! Encoded password hash value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An encoded (PHC string) password hash.
///
/// There is deliberately no `From<String>`: plaintext never converts into
/// this type by accident. Values come from the password hasher or from a
/// row that was written by it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-encoded PHC hash string.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Return the encoded PHC string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
