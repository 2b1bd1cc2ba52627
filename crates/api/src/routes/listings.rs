//! Route definitions for the `/listings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::listings;
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET  /                    -> list_listings
/// POST /                    -> create_listing
/// GET  /stats               -> listing_stats
/// GET  /{id}                -> get_listing
/// PUT  /{id}                -> update_listing
/// POST /{id}/approve        -> approve_listing
/// POST /{id}/reject         -> reject_listing
/// GET  /{id}/audit-logs     -> listing_audit_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route("/stats", get(listings::listing_stats))
        .route(
            "/{id}",
            get(listings::get_listing).put(listings::update_listing),
        )
        .route("/{id}/approve", post(listings::approve_listing))
        .route("/{id}/reject", post(listings::reject_listing))
        .route("/{id}/audit-logs", get(listings::listing_audit_logs))
}
