//! Integration tests for refresh token rotation, revocation, and
//! request authorization.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

async fn rotate(app: &TestApp, refresh: &str) -> helpers::TestResponse {
    app.request(
        "POST",
        "/api/v1/users/refresh-token",
        Some(json!({ "refreshToken": refresh })),
        None,
    )
    .await
}

#[tokio::test]
async fn test_rotation_chain_rejects_superseded_token() {
    let app = TestApp::new();
    let t1 = app.signed_up("alice", "pw123").await;

    let first = rotate(&app, &t1.refresh).await;
    assert_eq!(first.status, StatusCode::OK);
    let t2 = first.payload()["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(t2, t1.refresh);
    assert!(first.cookie("refreshToken").unwrap().contains(&t2));

    let replay = rotate(&app, &t1.refresh).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.message(), "Refresh token is expired or used");

    let second = rotate(&app, &t2).await;
    assert_eq!(second.status, StatusCode::OK);
    let t3 = second.payload()["refreshToken"].as_str().unwrap();
    assert_eq!(
        app.stored_user("alice").await.refresh_token.as_deref(),
        Some(t3)
    );
}

#[tokio::test]
async fn test_refresh_from_cookie() {
    let app = TestApp::new();
    let tokens = app.signed_up("alice", "pw123").await;

    let response = app
        .request_with_cookie(
            "POST",
            "/api/v1/users/refresh-token",
            None,
            &format!("refreshToken={}", tokens.refresh),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.cookie("accessToken").is_some());
}

#[tokio::test]
async fn test_refresh_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/users/refresh-token", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = rotate(&app, "").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = rotate(&app, "not.a.jwt").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_and_clears_cookies() {
    let app = TestApp::new();
    let tokens = app.signed_up("alice", "pw123").await;

    let response = app
        .request_with_cookie(
            "POST",
            "/api/v1/users/logout",
            None,
            &format!(
                "accessToken={}; refreshToken={}",
                tokens.access, tokens.refresh
            ),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.payload().is_null());
    assert!(response.cookie("accessToken").unwrap().contains("Max-Age=0"));
    assert!(response.cookie("refreshToken").unwrap().contains("Max-Age=0"));
    assert!(app.stored_user("alice").await.refresh_token.is_none());

    let replay = rotate(&app, &tokens.refresh).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_again_supersedes_previous_refresh_token() {
    let app = TestApp::new();
    let first = app.signed_up("alice", "pw123").await;
    let second = app.login("alice", "pw123").await;

    assert_eq!(rotate(&app, &first.refresh).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rotate(&app, &second.refresh).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_accepts_bearer_and_cookie() {
    let app = TestApp::new();
    let tokens = app.signed_up("alice", "pw123").await;

    let bearer = app
        .request("GET", "/api/v1/users/me", None, Some(&tokens.access))
        .await;
    assert_eq!(bearer.status, StatusCode::OK);
    assert_eq!(bearer.payload()["username"], "alice");

    let cookie = app
        .request_with_cookie(
            "GET",
            "/api/v1/users/me",
            None,
            &format!("accessToken={}", tokens.access),
        )
        .await;
    assert_eq!(cookie.status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_rejects_missing_or_wrong_tokens() {
    let app = TestApp::new();
    let tokens = app.signed_up("alice", "pw123").await;

    let missing = app.request("GET", "/api/v1/users/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["success"], false);

    let garbage = app
        .request("GET", "/api/v1/users/me", None, Some("garbage"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let refresh_as_access = app
        .request("GET", "/api/v1/users/me", None, Some(&tokens.refresh))
        .await;
    assert_eq!(refresh_as_access.status, StatusCode::UNAUTHORIZED);
}
