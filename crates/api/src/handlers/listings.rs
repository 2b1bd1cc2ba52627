//! Handlers for the `/listings` resource.
//!
//! Every mutation goes through [`ModerationService`](rentdesk_db::moderation::ModerationService),
//! which writes the matching audit entry in the same transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rentdesk_core::pagination::clamp_page;
use rentdesk_core::types::DbId;
use rentdesk_db::models::listing::{CreateListing, UpdateListing};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{LimitParams, ListingQueryParams, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/listings?status=&search=&page=
pub async fn list_listings(
    State(state): State<AppState>,
    AuthUser(_actor): AuthUser,
    QueryParams(params): QueryParams<ListingQueryParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .moderation
        .query_listings(
            params.status.as_deref().unwrap_or_default(),
            params.search.as_deref().unwrap_or_default(),
            clamp_page(params.page),
        )
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/listings/stats
pub async fn listing_stats(
    State(state): State<AppState>,
    AuthUser(_actor): AuthUser,
) -> AppResult<impl IntoResponse> {
    let stats = state.moderation.listing_stats().await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    AuthUser(_actor): AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = state.moderation.get_listing(id).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// POST /api/v1/listings
pub async fn create_listing(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(input): Json<CreateListing>,
) -> AppResult<impl IntoResponse> {
    let listing = state.moderation.create_listing(Some(&actor), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// PUT /api/v1/listings/{id}
///
/// Absent fields keep their stored value. An empty body is rejected.
pub async fn update_listing(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    let listing = state.moderation.edit_listing(id, Some(&actor), &input).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// POST /api/v1/listings/{id}/approve
pub async fn approve_listing(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = state.moderation.approve_listing(id, Some(&actor)).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// POST /api/v1/listings/{id}/reject
pub async fn reject_listing(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = state.moderation.reject_listing(id, Some(&actor)).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// GET /api/v1/listings/{id}/audit-logs?limit=
///
/// Entries outlive the listing they reference, so a missing listing yields
/// an empty or orphaned history rather than 404.
pub async fn listing_audit_logs(
    State(state): State<AppState>,
    AuthUser(_actor): AuthUser,
    Path(id): Path<DbId>,
    QueryParams(params): QueryParams<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(state.config.audit_log_limit);
    let entries = state.moderation.listing_audit_log(id, limit).await?;
    Ok(Json(DataResponse { data: entries }))
}
