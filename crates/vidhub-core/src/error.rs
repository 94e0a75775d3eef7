//! Unified application error types for VidHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the `?` operator. The HTTP layer turns the
//! [`ErrorKind`] into a status code; nothing below it knows about HTTP.

use std::fmt;
use thiserror::Error;

/// What went wrong, independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A required field is missing, empty, or malformed.
    Validation,
    /// Identifier not found or password mismatch.
    InvalidCredentials,
    /// Duplicate username or email.
    Conflict,
    /// No bearer token was presented.
    Unauthorized,
    /// Signature, expiry, type, or principal lookup failed.
    InvalidToken,
    /// A superseded refresh token was presented.
    TokenReplay,
    /// Token signing failed or yielded no value.
    TokenGenerationFailed,
    /// The remote media host rejected or failed an upload.
    UpstreamUploadFailed,
    /// The requested resource was not found.
    NotFound,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// True for faults the caller could not have avoided.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::TokenGenerationFailed
                | Self::UpstreamUploadFailed
                | Self::Database
                | Self::Configuration
                | Self::Serialization
                | Self::Internal
        )
    }

    /// Stable upper-snake code used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Conflict => "CONFLICT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenReplay => "TOKEN_REPLAY",
            Self::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            Self::UpstreamUploadFailed => "UPSTREAM_UPLOAD_FAILED",
            Self::NotFound => "NOT_FOUND",
            Self::Database => "DATABASE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The error every VidHub layer returns.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Category of the failure; selects the HTTP status.
    pub kind: ErrorKind,
    /// Caller-facing text; server faults are masked before reaching clients.
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Builds an error with no underlying cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that keeps `source` as its cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

macro_rules! kind_constructors {
    ($($name:ident => $kind:ident),* $(,)?) => {
        impl AppError {
            $(
                #[doc = concat!("Shorthand for an [`ErrorKind::", stringify!($kind), "`] error.")]
                pub fn $name(message: impl Into<String>) -> Self {
                    Self::new(ErrorKind::$kind, message)
                }
            )*
        }
    };
}

kind_constructors! {
    validation => Validation,
    invalid_credentials => InvalidCredentials,
    conflict => Conflict,
    unauthorized => Unauthorized,
    invalid_token => InvalidToken,
    token_replay => TokenReplay,
    token_generation => TokenGenerationFailed,
    upstream_upload => UpstreamUploadFailed,
    not_found => NotFound,
    database => Database,
    configuration => Configuration,
    internal => Internal,
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
