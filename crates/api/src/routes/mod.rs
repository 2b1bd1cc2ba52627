pub mod audit;
pub mod auth;
pub mod health;
pub mod listings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/logout                         logout
/// /auth/me                             current actor
///
/// /listings                            query, create
/// /listings/stats                      counts per status
/// /listings/{id}                       get, edit
/// /listings/{id}/approve               approve (POST)
/// /listings/{id}/reject                reject (POST)
/// /listings/{id}/audit-logs            history of one listing
///
/// /audit-logs                          recent activity
/// ```
///
/// Everything except login requires a session (enforced by handler
/// extractors).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/listings", listings::router())
        .nest("/audit-logs", audit::router())
}
