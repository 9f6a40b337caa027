//! Recording mock of the Gudang backend, served by axum on an ephemeral port.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use gudang_admin::{
    App, AppConfig, MemoryStorage, StaticSeoProvider,
    storage::{StorageState, TOKEN_KEY, USER_KEY},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// One request as seen by the backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone, Default)]
pub struct MockBackend {
    routes: Arc<Mutex<HashMap<(String, String), (u16, Value)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned answer for `method path`. Unregistered routes answer 404.
    pub fn respond(self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self, method: &str, path: &str) -> Option<Recorded> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
    }
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    backend.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        request_id: header("x-request-id"),
        content_type: header("content-type"),
        body: body.to_vec(),
    });

    let canned = backend
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();
    match canned {
        Some((status, body)) => {
            let status = StatusCode::from_u16(status).unwrap();
            (status, Json(body)).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
    }
}

/// Serves `backend` on 127.0.0.1 and returns its base address.
pub async fn spawn_backend(backend: MockBackend) -> String {
    let router = Router::new().fallback(handle).with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    address
}

pub fn config_for(address: &str) -> AppConfig {
    AppConfig {
        api_url: address.to_string(),
        site_url: address.to_string(),
        ..AppConfig::default()
    }
}

pub fn user_json(id: i64, username: &str, roles: &[&str]) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@gudanggrosiran.test"),
        "name": username,
        "roles": roles,
    })
}

/// Storage holding a session persisted by an earlier run.
pub fn stored_session(username: &str, roles: &[&str], token: &str) -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::with_entries([
        (USER_KEY.to_string(), user_json(1, username, roles).to_string()),
        (TOKEN_KEY.to_string(), token.to_string()),
    ]))
}

/// App wired to `address` with in-memory storage and canned SEO records.
pub fn app_with(address: &str, storage: StorageState, seo: StaticSeoProvider) -> App {
    App::new(config_for(address), storage, Arc::new(seo)).expect("app should build")
}
