//! Integration tests for password change and profile updates.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{FilePart, TestApp};

#[tokio::test]
async fn test_change_password_keeps_session() {
    let app = TestApp::new();
    let tokens = app.signed_up("alice", "pw123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/change-password",
            Some(json!({ "oldPassword": "pw123", "newPassword": "pw456" })),
            Some(&tokens.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let stored = app.stored_user("alice").await;
    assert_eq!(stored.refresh_token.as_deref(), Some(tokens.refresh.as_str()));

    let old = app
        .request(
            "POST",
            "/api/v1/users/login",
            Some(json!({ "username": "alice", "password": "pw123" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    app.login("alice", "pw456").await;
}

#[tokio::test]
async fn test_change_password_rejects_wrong_old_password() {
    let app = TestApp::new();
    let tokens = app.signed_up("alice", "pw123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/change-password",
            Some(json!({ "oldPassword": "nope", "newPassword": "pw456" })),
            Some(&tokens.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid old password");

    let response = app
        .request(
            "POST",
            "/api/v1/users/change-password",
            Some(json!({ "oldPassword": "pw123", "newPassword": "" })),
            Some(&tokens.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_account() {
    let app = TestApp::new();
    let alice = app.signed_up("alice", "pw123").await;
    app.signed_up("bob", "pw123").await;

    let empty = app
        .request("PATCH", "/api/v1/users/account", Some(json!({})), Some(&alice.access))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let taken = app
        .request(
            "PATCH",
            "/api/v1/users/account",
            Some(json!({ "email": "bob@x.com" })),
            Some(&alice.access),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);

    let updated = app
        .request(
            "PATCH",
            "/api/v1/users/account",
            Some(json!({ "fullName": "Alice Liddell", "email": "alice@wonder.land" })),
            Some(&alice.access),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.payload()["fullName"], "Alice Liddell");
    assert_eq!(updated.payload()["email"], "alice@wonder.land");
}

#[tokio::test]
async fn test_update_avatar_and_cover_image() {
    let app = TestApp::new();
    let tokens = app.signed_up("alice", "pw123").await;

    let avatar = app
        .multipart(
            "PATCH",
            "/api/v1/users/avatar",
            &[],
            &[FilePart {
                field: "avatar",
                file_name: "new-avatar.png",
                content_type: "image/png",
                data: b"new avatar",
            }],
            Some(&tokens.access),
        )
        .await;
    assert_eq!(avatar.status, StatusCode::OK);
    assert!(
        avatar.payload()["avatar"]
            .as_str()
            .unwrap()
            .ends_with("new-avatar.png")
    );

    let cover = app
        .multipart(
            "PATCH",
            "/api/v1/users/cover-image",
            &[],
            &[FilePart {
                field: "coverImage",
                file_name: "cover.png",
                content_type: "image/png",
                data: b"cover",
            }],
            Some(&tokens.access),
        )
        .await;
    assert_eq!(cover.status, StatusCode::OK);
    assert!(
        cover.payload()["coverImage"]
            .as_str()
            .unwrap()
            .ends_with("cover.png")
    );

    let missing = app
        .multipart("PATCH", "/api/v1/users/avatar", &[], &[], Some(&tokens.access))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_avatar_upload_leaves_record_untouched() {
    let app = TestApp::new();
    let tokens = app.signed_up("alice", "pw123").await;
    let before = app.stored_user("alice").await.avatar;
    app.fail_uploads();

    let response = app
        .multipart(
            "PATCH",
            "/api/v1/users/avatar",
            &[],
            &[helpers::avatar_part()],
            Some(&tokens.access),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.message(), "Failed to upload media");
    assert_eq!(app.stored_user("alice").await.avatar, before);
}

#[tokio::test]
async fn test_profile_routes_require_auth() {
    let app = TestApp::new();
    let response = app
        .request("PATCH", "/api/v1/users/account", Some(json!({ "fullName": "x" })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
