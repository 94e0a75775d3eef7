//! Integration tests for channel profiles, subscriptions, and watch history.

mod helpers;

use http::StatusCode;

use helpers::{FilePart, TestApp};

fn clip_parts(title: &str) -> [FilePart<'_>; 2] {
    [
        FilePart {
            field: "videoFile",
            file_name: "clip.mp4",
            content_type: "video/mp4",
            data: b"mp4 bytes",
        },
        FilePart {
            field: "thumbnail",
            file_name: title,
            content_type: "image/jpeg",
            data: b"jpg bytes",
        },
    ]
}

async fn publish_video(app: &TestApp, owner_token: &str, title: &str) -> String {
    let response = app
        .multipart(
            "POST",
            "/api/v1/videos",
            &[("title", title), ("description", "demo"), ("duration", "61.5")],
            &clip_parts(title),
            Some(owner_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "publish failed: {}", response.body);
    response.payload()["_id"]
        .as_str()
        .expect("video id")
        .to_string()
}

#[tokio::test]
async fn test_publish_video() {
    let app = TestApp::new();
    let alice = app.signed_up("alice", "pw123").await;
    let alice_id = app.stored_user("alice").await.id;

    let response = app
        .multipart(
            "POST",
            "/api/v1/videos",
            &[("title", " Intro "), ("duration", "12"), ("isPublished", "false")],
            &clip_parts("intro.jpg"),
            Some(&alice.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let video = response.payload();
    assert_eq!(video["title"], "Intro");
    assert_eq!(video["owner"], alice_id.to_string());
    assert_eq!(video["isPublished"], false);
    assert_eq!(video["views"], 0);
    assert!(video["videoFile"].as_str().unwrap().ends_with("clip.mp4"));
    assert_eq!(app.store.video_count(), 1);
}

#[tokio::test]
async fn test_publish_video_errors() {
    let app = TestApp::new();
    let alice = app.signed_up("alice", "pw123").await;
    let [video_part, _] = clip_parts("t.jpg");

    let no_thumbnail = app
        .multipart(
            "POST",
            "/api/v1/videos",
            &[("title", "Intro")],
            &[video_part],
            Some(&alice.access),
        )
        .await;
    assert_eq!(no_thumbnail.status, StatusCode::BAD_REQUEST);

    let bad_duration = app
        .multipart(
            "POST",
            "/api/v1/videos",
            &[("title", "Intro"), ("duration", "long")],
            &clip_parts("t.jpg"),
            Some(&alice.access),
        )
        .await;
    assert_eq!(bad_duration.status, StatusCode::BAD_REQUEST);

    let anonymous = app
        .multipart(
            "POST",
            "/api/v1/videos",
            &[("title", "Intro")],
            &clip_parts("t.jpg"),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    app.fail_uploads();
    let upstream = app
        .multipart(
            "POST",
            "/api/v1/videos",
            &[("title", "Intro")],
            &clip_parts("t.jpg"),
            Some(&alice.access),
        )
        .await;
    assert_eq!(upstream.status, StatusCode::BAD_GATEWAY);
    assert_eq!(app.store.video_count(), 0);
}

#[tokio::test]
async fn test_channel_profile_reflects_subscriptions() {
    let app = TestApp::new();
    app.signed_up("alice", "pw123").await;
    let bob = app.signed_up("bob", "pw123").await;
    let carol = app.signed_up("carol", "pw123").await;
    let alice_id = app.stored_user("alice").await.id;

    for token in [&bob.access, &carol.access] {
        let response = app
            .request(
                "POST",
                &format!("/api/v1/subscriptions/{alice_id}"),
                None,
                Some(token.as_str()),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let as_bob = app
        .request("GET", "/api/v1/users/channel/alice", None, Some(&bob.access))
        .await;
    assert_eq!(as_bob.status, StatusCode::OK);
    assert_eq!(as_bob.payload()["subscribersCount"], 2);
    assert_eq!(as_bob.payload()["channelsSubscribedToCount"], 0);
    assert_eq!(as_bob.payload()["isSubscribed"], true);

    let anonymous = app
        .request("GET", "/api/v1/users/channel/ALICE", None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.payload()["isSubscribed"], false);

    let bob_profile = app
        .request("GET", "/api/v1/users/channel/bob", None, None)
        .await;
    assert_eq!(bob_profile.payload()["channelsSubscribedToCount"], 1);
}

#[tokio::test]
async fn test_subscribe_is_idempotent_and_unsubscribe_removes() {
    let app = TestApp::new();
    app.signed_up("alice", "pw123").await;
    let bob = app.signed_up("bob", "pw123").await;
    let path = format!("/api/v1/subscriptions/{}", app.stored_user("alice").await.id);

    for _ in 0..2 {
        let response = app.request("POST", &path, None, Some(&bob.access)).await;
        assert_eq!(response.status, StatusCode::OK);
    }
    let profile = app
        .request("GET", "/api/v1/users/channel/alice", None, None)
        .await;
    assert_eq!(profile.payload()["subscribersCount"], 1);

    let response = app.request("DELETE", &path, None, Some(&bob.access)).await;
    assert_eq!(response.status, StatusCode::OK);
    let profile = app
        .request("GET", "/api/v1/users/channel/alice", None, None)
        .await;
    assert_eq!(profile.payload()["subscribersCount"], 0);
}

#[tokio::test]
async fn test_subscribe_errors() {
    let app = TestApp::new();
    let alice = app.signed_up("alice", "pw123").await;
    let alice_id = app.stored_user("alice").await.id;

    let own = app
        .request(
            "POST",
            &format!("/api/v1/subscriptions/{alice_id}"),
            None,
            Some(&alice.access),
        )
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "POST",
            &format!("/api/v1/subscriptions/{}", uuid::Uuid::new_v4()),
            None,
            Some(&alice.access),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("POST", "/api/v1/subscriptions/not-a-uuid", None, Some(&alice.access))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let anonymous = app
        .request("POST", &format!("/api/v1/subscriptions/{alice_id}"), None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_channel_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/v1/users/channel/ghost", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Channel does not exist");
}

#[tokio::test]
async fn test_watch_history_newest_first() {
    let app = TestApp::new();
    let alice = app.signed_up("alice", "pw123").await;
    let bob = app.signed_up("bob", "pw123").await;
    let intro = publish_video(&app, &alice.access, "intro").await;
    let outro = publish_video(&app, &alice.access, "outro").await;

    for video in [&intro, &outro, &intro] {
        let response = app
            .request(
                "POST",
                &format!("/api/v1/videos/{video}/watch"),
                None,
                Some(&bob.access),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let history = app
        .request("GET", "/api/v1/users/history", None, Some(&bob.access))
        .await;
    assert_eq!(history.status, StatusCode::OK);
    let entries = history.payload().as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["video"]["title"], "intro");
    assert_eq!(entries[0]["video"]["views"], 2);
    assert_eq!(entries[0]["video"]["owner"]["username"], "alice");
    assert_eq!(entries[1]["video"]["title"], "outro");
}

#[tokio::test]
async fn test_watch_unknown_video_is_not_found() {
    let app = TestApp::new();
    let bob = app.signed_up("bob", "pw123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/v1/videos/{}/watch", uuid::Uuid::new_v4()),
            None,
            Some(&bob.access),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/v1/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.payload()["status"], "ok");
    assert_eq!(response.payload()["database"], "memory");
    assert_eq!(response.payload()["media"], "stub");
}
