//! Integration tests for the gateway operations
//!
//! A wiremock server stands in for the remote backend so every operation
//! can be exercised end to end, including its failure paths.

use std::io::Write;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::config::BackendConfig;
use gateway::models::UploadedAsset;
use gateway::{BackendClient, FileKind, Gateway, GatewayError, VideoForm};

fn gateway_for(server: &MockServer) -> Gateway {
    let config = BackendConfig {
        endpoint: server.uri(),
        platform_id: "com.reelshare.app".to_string(),
        project_id: "reelshare-dev".to_string(),
        database_id: "reelshare".to_string(),
        user_collection_id: "users".to_string(),
        video_collection_id: "videos".to_string(),
        storage_bucket_id: "media".to_string(),
    };
    Gateway::new(BackendClient::new(config))
}

fn session_body() -> serde_json::Value {
    serde_json::json!({
        "id": "s1",
        "user_id": "a1",
        "token": "tok-1",
        "expires_at": "2030-01-01T00:00:00Z"
    })
}

fn post_body(id: &str, creator_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("post {id}"),
        "thumbnail_url": "http://files/thumb",
        "video_url": "http://files/video",
        "prompt": "a prompt",
        "creator_id": creator_id,
        "created_at": "2026-01-02T03:04:05Z"
    })
}

fn temp_asset(name: &str, mime_type: &str) -> (tempfile::NamedTempFile, UploadedAsset) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"media bytes").unwrap();
    let asset = UploadedAsset {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        size: 11,
        path: file.path().to_path_buf(),
    };
    (file, asset)
}

/// Values of the repeated `queries[]` parameter of the only request the
/// server received for the given path.
async fn queries_sent(server: &MockServer, wanted_path: &str) -> Vec<String> {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|r| r.url.path() == wanted_path)
        .expect("expected request was never sent");
    request
        .url
        .query_pairs()
        .filter(|(key, _)| key == "queries[]")
        .map(|(_, value)| value.into_owned())
        .collect()
}

#[tokio::test]
async fn create_user_links_profile_to_the_new_account() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "a1",
            "email": "vega@example.com",
            "name": "vega"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/account/sessions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(session_body()))
        .expect(1)
        .mount(&server)
        .await;

    // The profile document must be created under the session established by
    // the sign-in step.
    Mock::given(method("POST"))
        .and(path("/databases/reelshare/collections/users/documents"))
        .and(header("X-Session-Token", "tok-1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "p1",
            "account_id": "a1",
            "email": "vega@example.com",
            "username": "vega",
            "avatar_url": "http://avatars/initials?name=vega",
            "created_at": "2026-01-02T03:04:05Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let profile = gateway
        .create_user("vega@example.com", "hunter2hunter2", "vega")
        .await
        .unwrap();

    assert_eq!(profile.account_id, "a1");
    assert_eq!(profile.username, "vega");
}

#[tokio::test]
async fn create_user_rejects_bad_input_before_any_call() {
    let server = MockServer::start().await;
    let gateway = gateway_for(&server);

    let err = gateway
        .create_user("not-an-email", "hunter2hunter2", "vega")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidInput(_)));

    let err = gateway
        .create_user("vega@example.com", "short", "vega")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidInput(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn sign_in_returns_a_session_and_stores_its_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/sessions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(session_body()))
        .mount(&server)
        .await;

    let client = BackendClient::new(BackendConfig {
        endpoint: server.uri(),
        platform_id: "com.reelshare.app".to_string(),
        project_id: "reelshare-dev".to_string(),
        database_id: "reelshare".to_string(),
        user_collection_id: "users".to_string(),
        video_collection_id: "videos".to_string(),
        storage_bucket_id: "media".to_string(),
    });
    let gateway = Gateway::new(client.clone());

    let session = gateway.sign_in("vega@example.com", "hunter2hunter2").await.unwrap();
    assert!(!session.id.is_empty());
    assert!(client.has_session());
}

#[tokio::test]
async fn sign_in_failure_names_the_operation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/sessions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "invalid credentials" })),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .sign_in("vega@example.com", "wrong-password")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to sign in"));
    assert!(err.to_string().contains("invalid credentials"));
}

#[tokio::test]
async fn get_current_user_without_session_is_none_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "no active session" })),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.get_current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn get_current_user_resolves_the_profile_by_account_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "a1",
            "email": "vega@example.com",
            "name": "vega"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/databases/reelshare/collections/users/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 1,
            "documents": [{
                "id": "p1",
                "account_id": "a1",
                "email": "vega@example.com",
                "username": "vega",
                "avatar_url": "http://avatars/initials?name=vega",
                "created_at": "2026-01-02T03:04:05Z"
            }]
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let user = gateway.get_current_user().await.unwrap().unwrap();
    assert_eq!(user.id, "p1");

    let queries = queries_sent(&server, "/databases/reelshare/collections/users/documents").await;
    assert_eq!(
        queries,
        vec![r#"{"method":"equal","attribute":"account_id","value":"a1"}"#.to_string()]
    );
}

#[tokio::test]
async fn get_current_user_server_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway.get_current_user().await.unwrap_err();
    assert!(err.to_string().contains("Failed to get current user"));
}

#[tokio::test]
async fn latest_posts_request_newest_first_with_a_limit_of_seven() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/reelshare/collections/videos/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 2,
            "documents": [post_body("p2", "u1"), post_body("p1", "u1")]
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let posts = gateway.get_latest_posts().await.unwrap();
    assert_eq!(posts.len(), 2);

    let queries = queries_sent(&server, "/databases/reelshare/collections/videos/documents").await;
    assert_eq!(
        queries,
        vec![
            r#"{"method":"order_desc","attribute":"created_at"}"#.to_string(),
            r#"{"method":"limit","count":7}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn user_posts_request_creator_equality_newest_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/reelshare/collections/videos/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 1,
            "documents": [post_body("p1", "u7")]
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let posts = gateway.get_user_posts("u7").await.unwrap();
    assert_eq!(posts[0].creator_id, "u7");

    let queries = queries_sent(&server, "/databases/reelshare/collections/videos/documents").await;
    assert_eq!(
        queries,
        vec![
            r#"{"method":"equal","attribute":"creator_id","value":"u7"}"#.to_string(),
            r#"{"method":"order_desc","attribute":"created_at"}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn search_posts_sends_a_title_search_predicate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/reelshare/collections/videos/documents"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "total": 0, "documents": [] })),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.search_posts("sunset").await.unwrap().is_empty());

    let queries = queries_sent(&server, "/databases/reelshare/collections/videos/documents").await;
    assert_eq!(
        queries,
        vec![r#"{"method":"search","attribute":"title","term":"sunset"}"#.to_string()]
    );
}

#[tokio::test]
async fn sign_out_deletes_the_session_and_clears_the_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/sessions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(session_body()))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/account/sessions/current"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = BackendClient::new(BackendConfig {
        endpoint: server.uri(),
        platform_id: "com.reelshare.app".to_string(),
        project_id: "reelshare-dev".to_string(),
        database_id: "reelshare".to_string(),
        user_collection_id: "users".to_string(),
        video_collection_id: "videos".to_string(),
        storage_bucket_id: "media".to_string(),
    });
    let gateway = Gateway::new(client.clone());

    gateway.sign_in("vega@example.com", "hunter2hunter2").await.unwrap();
    assert!(client.has_session());

    gateway.sign_out().await.unwrap();
    assert!(!client.has_session());
}

#[tokio::test]
async fn sign_out_without_a_session_still_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/account/sessions/current"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "no active session" })),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.sign_out().await.unwrap();
}

#[tokio::test]
async fn upload_of_nothing_is_a_no_op() {
    let server = MockServer::start().await;
    let gateway = gateway_for(&server);

    let url = gateway.upload_file(None, FileKind::Image).await.unwrap();

    assert!(url.is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn uploaded_image_resolves_to_its_preview_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/buckets/media/files"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "f9",
            "bucket_id": "media",
            "name": "thumb.jpg",
            "mime_type": "image/jpeg",
            "size": 11
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let (_guard, asset) = temp_asset("thumb.jpg", "image/jpeg");

    let url = gateway
        .upload_file(Some(&asset), FileKind::Image)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(url.path(), "/storage/buckets/media/files/f9/preview");
    assert!(url.query().unwrap().contains("width=2000"));
    assert!(url.query().unwrap().contains("gravity=top"));
}

#[tokio::test]
async fn create_video_makes_no_post_when_an_upload_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/buckets/media/files"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "message": "bucket unavailable" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/databases/reelshare/collections/videos/documents"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let (_thumb_guard, thumbnail) = temp_asset("thumb.jpg", "image/jpeg");
    let (_video_guard, video) = temp_asset("clip.mp4", "video/mp4");

    let form = VideoForm {
        title: "First clip".to_string(),
        prompt: "a sunset".to_string(),
        creator_id: "u1".to_string(),
        thumbnail,
        video,
    };

    let err = gateway.create_video(&form).await.unwrap_err();
    assert!(err.to_string().contains("Failed to create video"));
}

#[tokio::test]
async fn create_video_uploads_both_assets_then_creates_the_post() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/buckets/media/files"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "f1",
            "bucket_id": "media",
            "name": "asset",
            "mime_type": "application/octet-stream",
            "size": 11
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/databases/reelshare/collections/videos/documents"))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_body("p1", "u1")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let (_thumb_guard, thumbnail) = temp_asset("thumb.jpg", "image/jpeg");
    let (_video_guard, video) = temp_asset("clip.mp4", "video/mp4");

    let form = VideoForm {
        title: "First clip".to_string(),
        prompt: "a sunset".to_string(),
        creator_id: "u1".to_string(),
        thumbnail,
        video,
    };

    let post = gateway.create_video(&form).await.unwrap();
    assert_eq!(post.id, "p1");
    assert_eq!(post.creator_id, "u1");
}

#[tokio::test]
async fn preview_urls_are_scoped_to_the_same_file_id() {
    let server = MockServer::start().await;
    let gateway = gateway_for(&server);

    let image = gateway.file_preview_url("f1", FileKind::Image).unwrap();
    let video = gateway.file_preview_url("f1", FileKind::Video).unwrap();

    assert!(image.path().contains("/files/f1/preview"));
    assert!(video.path().contains("/files/f1/view"));
}
