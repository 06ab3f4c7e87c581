#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use platewise_api::auth::jwt::{generate_access_token, JwtConfig};
use platewise_api::config::ServerConfig;
use platewise_api::router::build_app_router;
use platewise_api::state::AppState;
use platewise_places::{PlacesClient, PlacesConfig};
use sqlx::PgPool;
use tower::ServiceExt;

const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default).
/// Places has no API key, so every lookup is served from placeholders
/// without touching the network.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        places: PlacesConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Same stack as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_places(pool, test_config().places)
}

/// Same as [`build_test_app`] with a custom places configuration, e.g. one
/// pointing at an in-process stub.
pub fn build_test_app_with_places(pool: PgPool, places: PlacesConfig) -> Router {
    let config = ServerConfig {
        places,
        ..test_config()
    };
    let places = PlacesClient::new(config.places.clone()).unwrap();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        places: Arc::new(places),
    };

    build_app_router(state, &config)
}

/// A valid access token for `user_id`.
pub fn token_for(user_id: &str) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, Method::POST, uri, Some(token), body).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, Method::PUT, uri, Some(token), body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
