//! Maps domain `AppError` to HTTP responses.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use vidhub_core::error::{AppError, ErrorKind};

use crate::dto::response::ApiResponse;

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Status code for an error kind.
    pub fn status_for(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidCredentials
            | ErrorKind::Unauthorized
            | ErrorKind::InvalidToken
            | ErrorKind::TokenReplay => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::UpstreamUploadFailed => StatusCode::BAD_GATEWAY,
            ErrorKind::TokenGenerationFailed
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::validation(rejection.body_text()))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self(AppError::validation(format!("Malformed multipart body: {}", err.body_text())))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = Self::status_for(err.kind);

        let message = if err.kind == ErrorKind::UpstreamUploadFailed {
            tracing::error!(kind = %err.kind, error = ?err, "Media host failure");
            "Failed to upload media".to_string()
        } else if err.kind.is_server_fault() {
            tracing::error!(kind = %err.kind, error = ?err, "Internal server error");
            "Something went wrong".to_string()
        } else {
            tracing::debug!(kind = %err.kind, message = %err.message, "Request rejected");
            err.message
        };

        ApiResponse::error(status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::status_for(ErrorKind::TokenReplay), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::status_for(ErrorKind::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::status_for(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(ApiError::status_for(ErrorKind::UpstreamUploadFailed), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ApiError::status_for(ErrorKind::TokenGenerationFailed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_server_fault_hides_detail() {
        let response = ApiError(AppError::database("connection refused on 10.0.0.3")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Something went wrong");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let response = ApiError(AppError::token_replay("Refresh token is expired or used")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Refresh token is expired or used");
    }
}
