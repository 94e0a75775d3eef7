//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use vidhub_auth::{PasswordHasher, SessionTokenManager};
use vidhub_core::config::AppConfig;
use vidhub_core::config::auth::AuthConfig;
use vidhub_core::config::database::DatabaseConfig;
use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::traits::media::{MediaHost, MediaUpload, UploadedMedia};
use vidhub_database::{MemoryStore, Stores, UserStore};
use vidhub_entity::user::User;

const BOUNDARY: &str = "vidhub-test-boundary";

/// Media host that records uploads and can be switched to fail.
#[derive(Debug, Default)]
pub struct StubMediaHost {
    pub fail: AtomicBool,
    pub uploads: AtomicUsize,
}

#[async_trait]
impl MediaHost for StubMediaHost {
    fn provider_type(&self) -> &str {
        "stub"
    }

    async fn upload(&self, upload: MediaUpload) -> AppResult<UploadedMedia> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::upstream_upload("stub media host rejected the upload"));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(UploadedMedia {
            url: format!("https://media.test/{n}/{}", upload.file_name),
            public_id: format!("stub-{n}"),
            bytes: upload.data.len() as u64,
        })
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct assertions
    pub store: Arc<MemoryStore>,
    /// Media host stub
    pub media: Arc<StubMediaHost>,
    /// Application config
    pub config: AppConfig,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header values
    pub cookies: Vec<String>,
}

impl TestResponse {
    /// The envelope payload.
    pub fn payload(&self) -> &Value {
        &self.body["payload"]
    }

    /// The envelope message.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// The `Set-Cookie` header for `name`, if any.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|c| c.starts_with(&format!("{name}=")))
            .map(String::as_str)
    }
}

/// Tokens returned by a successful login.
#[derive(Debug, Clone)]
pub struct Tokens {
    pub access: String,
    pub refresh: String,
}

/// A file part for multipart requests.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

pub fn avatar_part() -> FilePart<'static> {
    FilePart {
        field: "avatar",
        file_name: "avatar.png",
        content_type: "image/png",
        data: b"\x89PNG avatar",
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            provider: "memory".to_string(),
            ..DatabaseConfig::default()
        },
        auth: AuthConfig {
            access_token_secret: "integration-access-secret".to_string(),
            refresh_token_secret: "integration-refresh-secret".to_string(),
            ..AuthConfig::default()
        },
        media: Default::default(),
        logging: Default::default(),
    }
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let config = test_config();
        let store = Arc::new(MemoryStore::new());
        let media = Arc::new(StubMediaHost::default());

        let session_manager = SessionTokenManager::new(&config.auth, store.clone())
            .with_hasher(PasswordHasher::with_cost(8, 1, 1).expect("valid test argon2 params"));
        let state = vidhub_api::AppState::new(
            Arc::new(config.clone()),
            Stores::memory(store.clone()),
            media.clone(),
            session_manager,
        );

        Self {
            router: vidhub_api::build_app(state),
            store,
            media,
            config,
        }
    }

    /// Make every subsequent upload fail
    pub fn fail_uploads(&self) {
        self.media.fail.store(true, Ordering::SeqCst);
    }

    /// Look up a stored user
    pub async fn stored_user(&self, username: &str) -> User {
        UserStore::find_by_username(&*self.store, username)
            .await
            .expect("store lookup")
            .expect("user exists")
    }

    /// Register through the API with an avatar
    pub async fn register(&self, username: &str, email: &str, password: &str) -> TestResponse {
        self.multipart(
            "POST",
            "/api/v1/users/register",
            &[
                ("fullName", &format!("{username} full name")),
                ("email", email),
                ("username", username),
                ("password", password),
            ],
            &[avatar_part()],
            None,
        )
        .await
    }

    /// Register and log in, returning tokens
    pub async fn signed_up(&self, username: &str, password: &str) -> Tokens {
        let response = self
            .register(username, &format!("{username}@x.com"), password)
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        self.login(username, password).await
    }

    /// Login and return tokens
    pub async fn login(&self, username: &str, password: &str) -> Tokens {
        let response = self
            .request(
                "POST",
                "/api/v1/users/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let token = |key: &str| {
            response.payload()[key]
                .as_str()
                .expect("token in login payload")
                .to_string()
        };
        Tokens {
            access: token("accessToken"),
            refresh: token("refreshToken"),
        }
    }

    /// Make a JSON request, optionally with a bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send_json(req, body).await
    }

    /// Make a JSON request carrying a raw `Cookie` header
    pub async fn request_with_cookie(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: &str,
    ) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::COOKIE, cookie);
        self.send_json(req, body).await
    }

    /// Make a multipart request
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        fields: &[(&str, &str)],
        files: &[FilePart<'_>],
        token: Option<&str>,
    ) -> TestResponse {
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for file in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    file.field, file.file_name, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(file.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    async fn send_json(&self, req: http::request::Builder, body: Option<Value>) -> TestResponse {
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&body).expect("Failed to serialize body"),
                )),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            cookies,
        }
    }
}
