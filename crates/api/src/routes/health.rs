//! Liveness and readiness report for the moderation service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use rentdesk_db::models::listing::ListingStats;
use rentdesk_db::repositories::ListingRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the store is reachable and fully migrated, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    pub migrations: MigrationHealth,
    /// Listing counts per status; absent when the store cannot be read.
    pub listings: Option<ListingStats>,
}

#[derive(Debug, Serialize)]
pub struct MigrationHealth {
    /// Successfully applied migrations; absent when the ledger is unreadable.
    pub applied: Option<i64>,
    pub known: i64,
}

impl HealthResponse {
    fn is_ok(&self) -> bool {
        self.database.reachable
            && self.database.migrations.applied == Some(self.database.migrations.known)
    }
}

/// GET /health
///
/// Reports 200 when the service can moderate listings and 503 otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let reachable = rentdesk_db::health_check(&state.pool).await.is_ok();

    let (applied, listings) = if reachable {
        (
            rentdesk_db::applied_migrations(&state.pool).await.ok(),
            ListingRepo::count_by_status(&state.pool).await.ok(),
        )
    } else {
        (None, None)
    };

    let mut report = HealthResponse {
        status: "degraded",
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            reachable,
            migrations: MigrationHealth {
                applied,
                known: rentdesk_db::known_migrations(),
            },
            listings,
        },
    };

    let code = if report.is_ok() {
        report.status = "ok";
        StatusCode::OK
    } else {
        tracing::warn!(reachable, ?applied, "Health check degraded");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(report))
}

/// Mount `/health` at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
