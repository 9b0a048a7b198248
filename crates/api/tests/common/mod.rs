//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are sent directly to the router via `tower::ServiceExt`
//! without a TCP listener. Tokens are minted with the same test secret
//! the router validates against.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use salles_api::auth::jwt::{generate_access_token, JwtConfig};
use salles_api::config::ServerConfig;
use salles_api::router::build_app_router;
use salles_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-length".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This goes through [`build_app_router`] so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a valid access token for the given requester id and role name.
pub fn token_for(requester_id: &str, role: &str) -> String {
    generate_access_token(requester_id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Token for a privileged requester (auto-approval, approval queue access).
pub fn privileged_token(requester_id: &str) -> String {
    token_for(requester_id, "privileged")
}

/// Token for an ordinary requester (queues through approval).
pub fn ordinary_token(requester_id: &str) -> String {
    token_for(requester_id, "ordinary")
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn get_unauthed(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response has the given status and return its parsed body.
pub async fn expect_status(
    response: Response<Body>,
    status: StatusCode,
) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
