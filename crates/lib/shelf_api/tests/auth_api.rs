//! Registration, login and bearer-guard behaviour through the router.

mod common;

use axum::http::{StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::json;
use shelf_core::auth::jwt::TokenService;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn register_returns_user_without_password() {
    let app = app();
    let (status, body) = register(&app, "testuser", "testpass").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "testuser");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_without_trailing_slash_is_accepted() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/users",
            None,
            &json!({"username": "testuser", "password": "testpass"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "testuser");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = app();
    let (first, _) = register(&app, "testuser", "testpass").await;
    assert_eq!(first, StatusCode::OK);

    let (status, body) = register(&app, "testuser", "another").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Username already registered"}));
}

#[tokio::test]
async fn malformed_registration_body_is_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request("POST", "/users/", None, &json!({"username": "testuser"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let (status, _) = register(&app, "   ", "testpass").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_returns_bearer_token() {
    let app = app();
    register(&app, "testuser", "testpass").await;

    let (status, body) = send(&app, login_request("testuser", "testpass")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().expect("token");
    let tokens = TokenService::new(SECRET.as_bytes(), test_config().token_ttl);
    assert_eq!(tokens.verify(token).expect("verify"), "testuser");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = app();
    register(&app, "testuser", "testpass").await;

    let resp = app
        .clone()
        .oneshot(login_request("testuser", "wrongpass"))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).map(|v| v.as_bytes()),
        Some(&b"Bearer"[..])
    );

    let (status, body) = send(&app, login_request("testuser", "wrongpass")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"detail": "Incorrect username or password"}));
}

#[tokio::test]
async fn overlong_password_is_refused_at_registration() {
    let app = app();
    let (status, body) = register(&app, "longpass", &"x".repeat(100)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let (status, _) = send(&app, login_request("longpass", &"x".repeat(72))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_password_extending_the_real_one_is_unauthorized() {
    let app = app();
    let stored = "x".repeat(71);
    let (status, _) = register(&app, "prefix", &stored).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, login_request("prefix", &stored)).await;
    assert_eq!(status, StatusCode::OK);

    let extended = format!("{stored}{}", "y".repeat(29));
    let (status, body) = send(&app, login_request("prefix", &extended)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"detail": "Incorrect username or password"}));
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let app = app();
    let (status, _) = send(&app, login_request("ghost", "testpass")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_json_instead_of_form_is_bad_request() {
    let app = app();
    register(&app, "testuser", "testpass").await;
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/token",
            None,
            &json!({"username": "testuser", "password": "testpass"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_routes_require_a_token() {
    let app = app();
    let routes = [
        ("GET", "/products"),
        ("POST", "/products"),
        ("GET", "/products/1"),
        ("PUT", "/products/1"),
        ("DELETE", "/products/1"),
    ];
    for (method, uri) in routes {
        let (status, body) = send(&app, bare_request(method, uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body, json!({"detail": "Not authenticated"}));
    }
}

#[tokio::test]
async fn garbage_and_foreign_tokens_are_rejected() {
    let app = app();
    register(&app, "testuser", "testpass").await;

    let (status, body) = send(&app, bare_request("GET", "/products", Some("garbage"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"detail": "Could not validate credentials"}));

    let foreign = TokenService::new(b"someone-else", test_config().token_ttl)
        .issue("testuser")
        .expect("issue");
    let (status, _) = send(&app, bare_request("GET", "/products", Some(&foreign))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = app();
    register(&app, "testuser", "testpass").await;

    let expired = TokenService::new(SECRET.as_bytes(), test_config().token_ttl)
        .issue_at("testuser", Utc::now() - Duration::hours(2))
        .expect("issue");
    let (status, _) = send(&app, bare_request("GET", "/products", Some(&expired))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_unregistered_subject_is_rejected() {
    let app = app();
    let orphan = TokenService::new(SECRET.as_bytes(), test_config().token_ttl)
        .issue("nobody")
        .expect("issue");
    let (status, _) = send(&app, bare_request("GET", "/products", Some(&orphan))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let app = app();
    let token = token(&app).await;
    let req = axum::http::Request::builder()
        .method("GET")
        .uri("/products")
        .header(header::AUTHORIZATION, format!("Basic {token}"))
        .body(axum::body::Body::empty())
        .expect("build request");
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let (status, body) = send(&app, bare_request("GET", "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_connected"], true);
    assert_eq!(body["version"], shelf_core::version());
}
