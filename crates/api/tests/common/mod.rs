#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use vfe_api::auth::jwt::{generate_access_token, JwtConfig, ACCESS_TOKEN_TTL_SECS};
use vfe_api::auth::password::hash_password;
use vfe_api::config::ServerConfig;
use vfe_api::router::build_app_router;
use vfe_api::state::AppState;
use vfe_db::models::user::{CreateUser, User};
use vfe_db::repositories::UserRepo;
use vfe_scanner::Reconciler;

/// Secret shared by the test app and tokens minted in tests.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough";

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
    }
}

/// Build a test `ServerConfig` pointing at `storage_root`.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        storage_root: storage_root.to_path_buf(),
        cors_origins: vec!["http://localhost:8000".to_string()],
        request_timeout_secs: 30,
        scan_interval_secs: None,
        bootstrap_admin_password: None,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router (same middleware stack as production)
/// over `pool`, with the storage root at `storage_root`.
pub fn build_test_app_with_storage(pool: SqlitePool, storage_root: &Path) -> Router {
    let config = test_config(storage_root);
    let reconciler = Arc::new(Reconciler::new(pool.clone(), storage_root));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        reconciler,
    };

    build_app_router(state, &config)
}

/// Build the application for tests that never touch the storage tree.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let unused: PathBuf = std::env::temp_dir().join("vfe-api-tests-unused-storage");
    build_test_app_with_storage(pool, &unused)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] directly into the database.
pub async fn create_user(pool: &SqlitePool, username: &str, role: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: None,
            role: role.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Mint a valid access token for `user` without going through login.
pub fn token_for(user: &User) -> String {
    generate_access_token(
        user.id,
        &user.role,
        &user.username,
        ACCESS_TOKEN_TTL_SECS,
        &test_jwt_config(),
    )
    .expect("token generation should succeed")
}

/// Create a user with `role` and return it with a token.
pub async fn user_with_token(pool: &SqlitePool, username: &str, role: &str) -> (User, String) {
    let user = create_user(pool, username, role).await;
    let token = token_for(&user);
    (user, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw body labelled as JSON, for payloads `serde_json::Value` cannot express.
pub async fn post_raw_json_auth(app: Router, uri: &str, raw: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}
