#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use envoy_api::config::ServerConfig;
use envoy_api::router::build_app_router;
use envoy_api::state::AppState;
use envoy_db::{DbConfig, MemoryStore};
use envoy_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        database: DbConfig {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "trojan_envoy_test".to_string(),
        },
    }
}

/// Build the full application router over an in-memory store.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with_bus(store, Arc::new(EventBus::default()))
}

/// Like [`build_test_app`], sharing `event_bus` so tests can observe events.
pub fn build_test_app_with_bus(store: Arc<MemoryStore>, event_bus: Arc<EventBus>) -> Router {
    let config = test_config();
    let state = AppState::new(store, config.clone(), event_bus);
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
