//! Route definitions for the recent-activity view.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/audit-logs`.
///
/// ```text
/// GET /    -> recent_audit_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(audit::recent_audit_logs))
}
