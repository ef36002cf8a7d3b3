/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An app instance backed by a throwaway snapshot file
/// - Request builders for authenticated and anonymous JSON calls
/// - Registration and task-creation helpers
///
/// Everything runs in-process against the router; no sockets are opened.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use taskflow_api::app::{build_router, AppState};
use taskflow_api::config::{ApiConfig, Config, JwtConfig, StoreConfig};
use taskflow_shared::store::JsonStore;
use tempfile::TempDir;
use tower::Service;

/// Signing secret shared by every test app instance
pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context owning the app and its backing snapshot file
pub struct TestContext {
    pub app: axum::Router,
    data_dir: TempDir,
}

impl TestContext {
    /// Creates a fresh app over an empty store
    pub fn new() -> Self {
        let data_dir = TempDir::new().expect("create temp dir");
        let app = build_app(&data_dir);
        Self { app, data_dir }
    }

    /// Rebuilds the store and router from the same snapshot file, the way a
    /// process restart would
    pub fn reopen(self) -> Self {
        let app = build_app(&self.data_dir);
        Self {
            app,
            data_dir: self.data_dir,
        }
    }

    /// Sends a request and returns status plus parsed JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let mut app = self.app.clone();
        let response = app.call(request).await.expect("request handled");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }

    /// Registers an account and returns its bearer token
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/auth/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": password
                })),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["token"]
            .as_str()
            .expect("token in response")
            .to_string()
    }

    /// Creates a task and returns the response's task object
    pub async fn create_task(&self, token: &str, payload: Value) -> Value {
        let (status, body) = self
            .send(json_request(Method::POST, "/tasks", Some(token), Some(payload)))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create task failed: {body}");
        body["task"].clone()
    }
}

/// Builds a JSON request, optionally authenticated
pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    }
}

fn build_app(data_dir: &TempDir) -> axum::Router {
    let path = data_dir.path().join("data.json");
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        store: StoreConfig { path: path.clone() },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            token_ttl_hours: 24,
        },
    };
    let store = Arc::new(JsonStore::open(path));
    build_router(AppState::new(store, config))
}
