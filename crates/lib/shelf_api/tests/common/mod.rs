//! Shared router-test helpers backed by the in-memory stores.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use shelf_api::{AppState, config::ApiConfig};
use shelf_core::memory::{MemoryProductStore, MemoryUserStore};
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        pg_connection_url: "postgres://unused".into(),
        jwt_secret: SECRET.into(),
        token_ttl: Duration::from_secs(30 * 60),
    }
}

pub fn app() -> Router {
    let state = AppState::with_stores(
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryProductStore::new()),
        &test_config(),
    );
    shelf_api::router(state)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("build request")
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .expect("build request")
}

pub async fn register(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            "/users/",
            None,
            &serde_json::json!({"username": username, "password": password}),
        ),
    )
    .await
}

/// Registers `testuser` and returns a bearer token for it.
pub async fn token(app: &Router) -> String {
    let (status, _) = register(app, "testuser", "testpass").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(app, login_request("testuser", "testpass")).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"]
        .as_str()
        .expect("access_token is a string")
        .to_string()
}

pub async fn create_product(app: &Router, token: &str, title: &str, price: f64) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/products",
            Some(token),
            &serde_json::json!({
                "title": title,
                "description": "This is a test product",
                "price": price,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body
}
