//! Handlers for the recent-activity view.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::{LimitParams, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/audit-logs?limit=
///
/// Most recent entries across all listings, newest first, each labelled with
/// its listing title or a fallback label.
pub async fn recent_audit_logs(
    State(state): State<AppState>,
    AuthUser(_actor): AuthUser,
    QueryParams(params): QueryParams<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(state.config.audit_log_limit);
    let entries = state.moderation.recent_audit_log(limit).await?;
    Ok(Json(DataResponse { data: entries }))
}
