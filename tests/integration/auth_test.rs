//! Integration tests for registration and login.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{FilePart, TestApp, avatar_part};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();
    let response = app.register("Alice", "Alice@X.com", "pw123").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["statusCode"], 201);
    assert_eq!(response.body["success"], true);
    let user = response.payload();
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "alice@x.com");
    assert!(user["avatar"].as_str().unwrap().ends_with("avatar.png"));
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("refreshToken").is_none());
}

#[tokio::test]
async fn test_register_with_cover_image() {
    let app = TestApp::new();
    let response = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &[
                ("fullName", "Bob"),
                ("email", "bob@x.com"),
                ("username", "bob"),
                ("password", "pw123"),
            ],
            &[
                avatar_part(),
                FilePart {
                    field: "coverImage",
                    file_name: "cover.jpg",
                    content_type: "image/jpeg",
                    data: b"cover bytes",
                },
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(
        response.payload()["coverImage"]
            .as_str()
            .unwrap()
            .ends_with("cover.jpg")
    );
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new();
    let response = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &[("fullName", "  "), ("email", "a@x.com"), ("username", "a"), ("password", "pw")],
            &[avatar_part()],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "All fields are required");
    assert!(response.payload().is_null());
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_register_requires_avatar() {
    let app = TestApp::new();
    let response = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &[
                ("fullName", "Alice"),
                ("email", "alice@x.com"),
                ("username", "alice"),
                ("password", "pw123"),
            ],
            &[],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Avatar is required");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123").await;

    let response = app.register("ALICE", "other@x.com", "pw123").await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app.register("other", "alice@x.com", "pw123").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_email_shaped_username() {
    let app = TestApp::new();
    app.register("bob", "bob@x.com", "bobpw").await;

    let response = app.register("bob@x.com", "mallory@x.com", "pw123").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.user_count(), 1);

    let login = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({ "email": "bob@x.com", "password": "bobpw" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.payload()["user"]["username"], "bob");
}

#[tokio::test]
async fn test_register_cover_image_parts() {
    let app = TestApp::new();
    let fields = [
        ("fullName", "Carol"),
        ("email", "carol@x.com"),
        ("username", "carol"),
        ("password", "pw123"),
    ];

    let empty_with_name = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &fields,
            &[
                avatar_part(),
                FilePart {
                    field: "coverImage",
                    file_name: "cover.jpg",
                    content_type: "image/jpeg",
                    data: b"",
                },
            ],
            None,
        )
        .await;
    assert_eq!(empty_with_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.user_count(), 0);

    let untouched_input = app
        .multipart(
            "POST",
            "/api/v1/users/register",
            &fields,
            &[
                avatar_part(),
                FilePart {
                    field: "coverImage",
                    file_name: "",
                    content_type: "application/octet-stream",
                    data: b"",
                },
            ],
            None,
        )
        .await;
    assert_eq!(untouched_input.status, StatusCode::CREATED);
    assert!(untouched_input.payload()["coverImage"].is_null());
}

#[tokio::test]
async fn test_register_with_failing_media_persists_nothing() {
    let app = TestApp::new();
    app.fail_uploads();

    let response = app.register("alice", "alice@x.com", "pw123").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(app.store.user_count(), 0);
}

#[tokio::test]
async fn test_login_success_sets_cookies_and_stores_refresh_token() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({ "username": "alice", "password": "pw123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let access = response.payload()["accessToken"].as_str().unwrap();
    let refresh = response.payload()["refreshToken"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_eq!(response.payload()["user"]["username"], "alice");

    let cookie = response.cookie("accessToken").expect("access cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(response.cookie("refreshToken").is_some());

    let stored = app.stored_user("alice").await;
    assert_eq!(stored.refresh_token.as_deref(), Some(refresh));
}

#[tokio::test]
async fn test_login_by_email() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({ "email": "ALICE@x.com", "password": "pw123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_look_alike() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123").await;

    let wrong = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({ "username": "alice", "password": "nope" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({ "username": "ghost", "password": "pw123" })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.message(), unknown.message());
    assert!(wrong.cookies.is_empty());
}

#[tokio::test]
async fn test_login_empty_input_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({ "username": "", "password": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("POST", "/api/v1/users/login", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}
