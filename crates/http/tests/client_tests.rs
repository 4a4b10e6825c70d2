//! Integration tests for the typed blog clients

mod common;

use common::{RecordingNavigator, access_token, harness, post_json};
use quill_core::{
    ApiConfig, CredentialPair, Credentials, MemoryCredentialStore, PostDraft, PostPatch,
};
use quill_http::{BlogClient, ClientError};
use std::sync::Arc;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signed_in_pair() -> CredentialPair {
    CredentialPair::new(access_token("alice", 1), "refresh-1")
}

#[tokio::test]
async fn test_public_list_posts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_json(1, "First", "alice"),
            post_json(2, "Second", "bob"),
        ])))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, None);
    let posts = h.client.public().list_posts().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].author_username, "bob");
}

#[tokio::test]
async fn test_obtain_token_pair() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "a-token",
            "refresh": "r-token",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, None);
    let pair = h
        .client
        .public()
        .obtain_token_pair(&Credentials::new("alice", "secret"))
        .await
        .unwrap();

    assert_eq!(pair, CredentialPair::new("a-token", "r-token"));
}

#[tokio::test]
async fn test_obtain_token_pair_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, None);
    let result = h
        .client
        .public()
        .obtain_token_pair(&Credentials::new("alice", "wrong"))
        .await;

    match result {
        Err(ClientError::AuthenticationFailed(message)) => {
            assert!(message.contains("No active account"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_access_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .and(body_json(json!({"refresh": "r-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, None);
    let access = h
        .client
        .public()
        .refresh_access_token("r-token")
        .await
        .unwrap();

    assert_eq!(access, "fresh");
}

#[tokio::test]
async fn test_create_post_sends_bearer_and_draft() {
    let mock_server = MockServer::start().await;
    let pair = signed_in_pair();

    Mock::given(method("POST"))
        .and(path("/posts/"))
        .and(header("authorization", format!("Bearer {}", pair.access).as_str()))
        .and(body_json(json!({"title": "Hello", "content": "World"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json(7, "Hello", "alice")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, Some(pair));
    let post = h
        .client
        .api()
        .create_post(&PostDraft::new("Hello", "World"))
        .await
        .unwrap();

    assert_eq!(post.id, 7);
    assert!(post.is_authored_by("alice"));
}

#[tokio::test]
async fn test_update_post_sends_only_changed_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/posts/7/"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(7, "Renamed", "alice")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, Some(signed_in_pair()));
    let patch = PostPatch {
        title: Some("Renamed".into()),
        content: None,
    };
    let post = h.client.api().update_post(7, &patch).await.unwrap();

    assert_eq!(post.title, "Renamed");
}

#[tokio::test]
async fn test_delete_post_accepts_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/posts/7/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, Some(signed_in_pair()));
    h.client.api().delete_post(7).await.unwrap();
}

#[tokio::test]
async fn test_list_posts_by_author() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_json(1, "Mine", "alice"),
            post_json(2, "Theirs", "bob"),
            post_json(3, "Also mine", "alice"),
        ])))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, Some(signed_in_pair()));
    let posts = h.client.api().list_posts_by("alice").await.unwrap();

    let ids: Vec<u64> = posts.iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/99/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/posts/2/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You do not have permission to perform this action."
        })))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server, Some(signed_in_pair()));

    let missing = h.client.api().get_post(99).await.unwrap_err();
    assert!(matches!(missing, ClientError::NotFound(_)));
    assert_eq!(missing.user_message(), "That post no longer exists.");

    let forbidden = h.client.api().delete_post(2).await.unwrap_err();
    assert!(matches!(forbidden, ClientError::Forbidden(_)));
    assert!(!forbidden.is_auth_expired());
}

#[tokio::test]
async fn test_transport_failure_is_propagated() {
    let store = Arc::new(MemoryCredentialStore::with_pair(signed_in_pair()));
    let navigator = Arc::new(RecordingNavigator::default());
    let config = ApiConfig::new("http://127.0.0.1:1").unwrap();
    let client = BlogClient::new(config, store, navigator.clone()).unwrap();

    let error = client.api().list_posts().await.unwrap_err();
    assert!(matches!(error, ClientError::Request(_)));
    assert!(client.session().is_authenticated());
    assert!(navigator.visits().is_empty());
}
