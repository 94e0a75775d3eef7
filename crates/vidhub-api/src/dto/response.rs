//! Response DTOs and the uniform envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use vidhub_auth::TokenPair;
use vidhub_entity::user::PublicUser;

/// Uniform response envelope returned by every endpoint.
///
/// ```json
/// { "statusCode": 200, "payload": { ... }, "message": "...", "success": true }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code, mirrored in the body.
    pub status_code: u16,
    /// Response data, `null` on errors.
    pub payload: Option<T>,
    /// Human-readable message.
    pub message: String,
    /// `true` for status codes below 400.
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 response carrying `payload`.
    pub fn ok(payload: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, Some(payload), message)
    }

    /// A 201 response carrying `payload`.
    pub fn created(payload: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::CREATED, Some(payload), message)
    }

    /// An envelope with an explicit status.
    pub fn with_status(status: StatusCode, payload: Option<T>, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            payload,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }
}

impl ApiResponse<()> {
    /// A 200 response with a `null` payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, None, message)
    }

    /// An error envelope.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with_status(status, None, message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Login payload: the user plus both tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: PublicUser,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
}

/// Payload of a successful rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
}

impl From<&TokenPair> for TokenResponse {
    fn from(tokens: &TokenPair) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
        }
    }
}

/// Liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `"ok"` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the state was built.
    pub uptime_seconds: u64,
    /// Active store backend.
    pub database: String,
    /// Active media host.
    pub media: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(42, "done")).unwrap();
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["payload"], 42);
        assert_eq!(body["message"], "done");
        assert_eq!(body["success"], true);
    }

    #[test]
    fn test_error_envelope_has_null_payload() {
        let body = serde_json::to_value(ApiResponse::error(StatusCode::CONFLICT, "taken")).unwrap();
        assert_eq!(body["statusCode"], 409);
        assert!(body["payload"].is_null());
        assert_eq!(body["success"], false);
    }
}
