//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rentdesk_api::auth::jwt::{generate_session_token, SessionConfig};
use rentdesk_api::auth::password::hash_password;
use rentdesk_api::auth::session::{FixedSessionGuard, JwtSessionGuard, SessionGuard};
use rentdesk_api::config::ServerConfig;
use rentdesk_api::router::build_app_router;
use rentdesk_api::state::AppState;
use rentdesk_core::actor::Actor;
use rentdesk_db::models::listing::{CreateListing, Listing};
use rentdesk_db::repositories::ListingRepo;
use rentdesk_db::DbPool;

pub const ADMIN_PASSWORD: &str = "admin123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        listings_page_size: 10,
        audit_log_limit: 100,
        seed_admin_username: "admin".to_string(),
        seed_admin_password: ADMIN_PASSWORD.to_string(),
        session: SessionConfig {
            secret: "integration-test-session-secret".to_string(),
            ttl_hours: 24,
            secure_cookies: false,
        },
    }
}

/// Fresh in-memory database with migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = rentdesk_db::create_memory_pool()
        .await
        .expect("in-memory pool should open");
    rentdesk_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    pool
}

/// Fresh database seeded with the admin account and sample listings.
pub async fn seeded_pool() -> DbPool {
    let pool = test_pool().await;
    let hash = hash_password(ADMIN_PASSWORD).expect("hashing should succeed");
    rentdesk_db::seed::seed_defaults(&pool, "admin", &hash)
        .await
        .expect("seeding should succeed");
    pool
}

/// Full application with the production JWT session guard.
pub fn build_test_app(pool: DbPool) -> Router {
    let config = test_config();
    let guard = Arc::new(JwtSessionGuard::new(config.session.clone()));
    build_app_with_guard(pool, guard)
}

/// Full application with the given session guard.
pub fn build_app_with_guard(pool: DbPool, guard: Arc<dyn SessionGuard>) -> Router {
    build_app_router(AppState::new(pool, test_config(), guard))
}

/// Application where every request is made by `admin()`.
pub fn build_signed_in_app(pool: DbPool) -> Router {
    build_app_with_guard(pool, Arc::new(FixedSessionGuard::signed_in(admin())))
}

/// Application where every request is anonymous.
pub fn build_anonymous_app(pool: DbPool) -> Router {
    build_app_with_guard(pool, Arc::new(FixedSessionGuard::anonymous()))
}

pub fn admin() -> Actor {
    Actor::new(1, "admin", "admin")
}

/// A session token for `admin()` signed with the test secret.
pub fn admin_token() -> String {
    generate_session_token(1, "admin", "admin", &test_config().session)
        .expect("token generation should succeed")
}

pub async fn insert_listing(pool: &DbPool, title: &str, make: &str) -> Listing {
    ListingRepo::create(
        pool,
        &CreateListing {
            title: title.to_string(),
            description: None,
            make: make.to_string(),
            model: "Model".to_string(),
            year: 2022,
            price_per_day: 40.0,
            location: "Denver, CO".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("listing insert should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with an optional JSON body and extra headers.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    headers: &[(&str, String)],
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, &[]).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None, &[]).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), &[]).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), &[]).await
}

pub async fn get_with_bearer(app: Router, uri: &str, token: &str) -> Response<Body> {
    let auth = (AUTHORIZATION.as_str(), format!("Bearer {token}"));
    send(app, Method::GET, uri, None, &[auth]).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, &[(COOKIE.as_str(), cookie.to_string())]).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
