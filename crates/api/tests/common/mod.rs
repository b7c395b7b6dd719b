//! Shared helpers for API integration tests.
//!
//! The router is built over a *lazy* connection pool: no PostgreSQL is
//! needed, because every path exercised here (auth rejection, input
//! validation, RBAC) fails before the first database round-trip. Tests that
//! do need real rows live in `crates/db/tests/` behind `--ignored`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;

use oficios_api::auth::jwt::{generate_access_token, JwtConfig};
use oficios_api::config::ServerConfig;
use oficios_api::router::build_app_router;
use oficios_api::state::AppState;
use oficios_core::roles::Role;
use oficios_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over a lazy pool.
///
/// This mirrors the router construction in `main.rs` so tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app() -> Router {
    let config = test_config();
    let pool = oficios_db::connect_lazy_pool("postgres://postgres@localhost/oficios_test")
        .expect("lazy pool construction must not touch the database");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a valid access token for the given principal.
pub fn token_for(user_id: DbId, role: Role) -> String {
    generate_access_token(user_id, role.as_str(), &test_config().jwt)
        .expect("token generation should succeed")
}

/// Build a JSON request, optionally authenticated with a Bearer token.
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).expect("request construction")
}

/// Collect a response into its status code and parsed JSON body.
pub async fn read_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    let json: serde_json::Value =
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
