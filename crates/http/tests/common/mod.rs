//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use quill_core::{ApiConfig, CredentialPair, MemoryCredentialStore, Navigator};
use quill_http::BlogClient;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

/// Unsigned access token carrying `username`; `serial` keeps tokens distinct
pub fn access_token(username: &str, serial: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = json!({
        "token_type": "access",
        "username": username,
        "iat": 1_700_000_000 + serial,
        "exp": 1_700_000_300 + serial,
    });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

pub fn post_json(id: u64, title: &str, author: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("{title} body"),
        "created_at": "2025-01-02T10:00:00Z",
        "updated_at": "2025-01-02T10:00:00Z",
        "author_username": author,
    })
}

/// Navigator that records every target
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn goto(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

pub struct Harness {
    pub client: BlogClient,
    pub store: Arc<MemoryCredentialStore>,
    pub navigator: Arc<RecordingNavigator>,
}

/// Route client logs through the test writer; RUST_LOG picks the level
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Client pointed at `server`, signed in with `pair` if given
pub fn harness(server: &MockServer, pair: Option<CredentialPair>) -> Harness {
    init_tracing();
    let store = Arc::new(match pair {
        Some(pair) => MemoryCredentialStore::with_pair(pair),
        None => MemoryCredentialStore::new(),
    });
    let navigator = Arc::new(RecordingNavigator::default());
    let config = ApiConfig::new(server.uri()).unwrap();
    let client = BlogClient::new(config, store.clone(), navigator.clone()).unwrap();

    Harness {
        client,
        store,
        navigator,
    }
}
