//! Audit-logged moderation workflow.
//!
//! Every mutating operation runs in one transaction that reads the prior
//! state, applies the listing change, and appends exactly one audit entry.
//! An error at any step drops the transaction, which rolls back both the
//! mutation and the audit write.

use rentdesk_core::actor::Actor;
use rentdesk_core::audit::{action_types, clamp_recent_limit};
use rentdesk_core::error::CoreError;
use rentdesk_core::listing::{validate_price_per_day, ListingStatus};
use rentdesk_core::pagination::{clamp_page_size, total_pages, DEFAULT_PAGE_SIZE};
use rentdesk_core::types::DbId;

use crate::models::audit::{AuditLogView, CreateAuditLog};
use crate::models::listing::{CreateListing, Listing, ListingPage, ListingStats, UpdateListing};
use crate::query::ListingQuery;
use crate::repositories::{AuditLogRepo, ListingRepo};
use crate::DbPool;

const LISTING: &str = "Listing";

/// Orchestrates listing mutations and their audit entries.
///
/// Cheap to clone; holds the shared pool and the configured page size.
#[derive(Clone)]
pub struct ModerationService {
    pool: DbPool,
    page_size: i64,
}

impl ModerationService {
    pub fn new(pool: DbPool, page_size: i64) -> Self {
        Self {
            pool,
            page_size: clamp_page_size(page_size),
        }
    }

    /// Service with the default dashboard page size.
    pub fn with_default_page_size(pool: DbPool) -> Self {
        Self::new(pool, DEFAULT_PAGE_SIZE)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Load a single listing.
    pub async fn get_listing(&self, id: DbId) -> Result<Listing, CoreError> {
        ListingRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?
            .ok_or(CoreError::NotFound { entity: LISTING, id })
    }

    /// One page of listings matching a status filter keyword and search text.
    pub async fn query_listings(
        &self,
        status_filter: &str,
        search_text: &str,
        page: i64,
    ) -> Result<ListingPage, CoreError> {
        let query = ListingQuery::parse(status_filter, search_text, page, self.page_size)?;

        // Items and total come from the same snapshot.
        let mut tx = self.pool.begin().await.map_err(store_error)?;
        let (items, total) = ListingRepo::list(&mut *tx, &query)
            .await
            .map_err(store_error)?;
        tx.commit().await.map_err(store_error)?;

        Ok(ListingPage {
            items,
            total,
            page: query.page,
            page_size: query.page_size,
            total_pages: total_pages(total, query.page_size),
        })
    }

    /// Listing counts per status.
    pub async fn listing_stats(&self) -> Result<ListingStats, CoreError> {
        ListingRepo::count_by_status(&self.pool)
            .await
            .map_err(store_error)
    }

    /// Most recent audit entries, newest first.
    pub async fn recent_audit_log(&self, limit: i64) -> Result<Vec<AuditLogView>, CoreError> {
        AuditLogRepo::list_recent(&self.pool, clamp_recent_limit(Some(limit)))
            .await
            .map_err(store_error)
    }

    /// Audit history of one listing, newest first.
    pub async fn listing_audit_log(
        &self,
        listing_id: DbId,
        limit: i64,
    ) -> Result<Vec<AuditLogView>, CoreError> {
        AuditLogRepo::list_for_listing(&self.pool, listing_id, clamp_recent_limit(Some(limit)))
            .await
            .map_err(store_error)
    }

    // -----------------------------------------------------------------------
    // Moderation actions
    // -----------------------------------------------------------------------

    /// Approve a listing, stamping the approver and approval time.
    ///
    /// Approving an already-approved listing succeeds, re-stamps the
    /// provenance, and appends another entry.
    pub async fn approve_listing(
        &self,
        id: DbId,
        actor: Option<&Actor>,
    ) -> Result<Listing, CoreError> {
        self.change_status(id, actor, ListingStatus::Approved, action_types::APPROVE)
            .await
    }

    /// Reject a listing. Prior approval provenance is left in place.
    pub async fn reject_listing(
        &self,
        id: DbId,
        actor: Option<&Actor>,
    ) -> Result<Listing, CoreError> {
        self.change_status(id, actor, ListingStatus::Rejected, action_types::REJECT)
            .await
    }

    /// Edit descriptive fields.
    ///
    /// The audit entry records the full prior row as "before" and the
    /// submitted fields (not the resolved row) as "after".
    pub async fn edit_listing(
        &self,
        id: DbId,
        actor: Option<&Actor>,
        fields: &UpdateListing,
    ) -> Result<Listing, CoreError> {
        let actor = require_actor(actor)?;
        if let Some(price) = fields.price_per_day {
            validate_price_per_day(price)?;
        }

        let mut tx = self.begin_write().await?;

        let before = ListingRepo::find_by_id(&mut *tx, id)
            .await
            .map_err(store_error)?
            .ok_or(CoreError::NotFound { entity: LISTING, id })?;

        let old_values = serde_json::to_string(&before).map_err(snapshot_error)?;
        let new_values = serde_json::to_string(fields).map_err(snapshot_error)?;

        let updated = ListingRepo::update_fields(&mut *tx, id, fields)
            .await
            .map_err(store_error)?
            .ok_or(CoreError::NotFound { entity: LISTING, id })?;

        AuditLogRepo::append(
            &mut *tx,
            &CreateAuditLog {
                listing_id: Some(id),
                admin_username: actor.username.clone(),
                action: action_types::EDIT.to_string(),
                old_values: Some(old_values),
                new_values: Some(new_values),
            },
        )
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        tracing::info!(
            listing_id = id,
            actor = %actor.username,
            action = action_types::EDIT,
            "Listing edited",
        );

        Ok(updated)
    }

    /// Create a new `pending` listing. The audit entry records the stored row
    /// as "after".
    pub async fn create_listing(
        &self,
        actor: Option<&Actor>,
        input: &CreateListing,
    ) -> Result<Listing, CoreError> {
        let actor = require_actor(actor)?;
        validate_price_per_day(input.price_per_day)?;

        let mut tx = self.begin_write().await?;

        let listing = ListingRepo::create(&mut *tx, input)
            .await
            .map_err(store_error)?;
        let new_values = serde_json::to_string(&listing).map_err(snapshot_error)?;

        AuditLogRepo::append(
            &mut *tx,
            &CreateAuditLog {
                listing_id: Some(listing.id),
                admin_username: actor.username.clone(),
                action: action_types::CREATE.to_string(),
                old_values: None,
                new_values: Some(new_values),
            },
        )
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        tracing::info!(
            listing_id = listing.id,
            actor = %actor.username,
            action = action_types::CREATE,
            "Listing created",
        );

        Ok(listing)
    }

    /// Open a write transaction that takes the database write lock up front.
    ///
    /// A deferred transaction that reads first cannot upgrade to a writer
    /// once another connection has committed in WAL mode; it fails with
    /// `SQLITE_BUSY_SNAPSHOT` instead of waiting on the busy timeout.
    async fn begin_write(&self) -> Result<sqlx::Transaction<'static, sqlx::Sqlite>, CoreError> {
        self.pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(store_error)
    }

    /// Shared approve/reject path. Status changes carry no before/after
    /// snapshots.
    async fn change_status(
        &self,
        id: DbId,
        actor: Option<&Actor>,
        status: ListingStatus,
        action: &'static str,
    ) -> Result<Listing, CoreError> {
        let actor = require_actor(actor)?;

        let mut tx = self.begin_write().await?;

        ListingRepo::find_by_id(&mut *tx, id)
            .await
            .map_err(store_error)?
            .ok_or(CoreError::NotFound { entity: LISTING, id })?;

        let listing = ListingRepo::set_status(&mut *tx, id, status, &actor.username)
            .await
            .map_err(store_error)?
            .ok_or(CoreError::NotFound { entity: LISTING, id })?;

        AuditLogRepo::append(
            &mut *tx,
            &CreateAuditLog {
                listing_id: Some(id),
                admin_username: actor.username.clone(),
                action: action.to_string(),
                old_values: None,
                new_values: None,
            },
        )
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        tracing::info!(
            listing_id = id,
            actor = %actor.username,
            action,
            status = %status,
            "Listing status changed",
        );

        Ok(listing)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_actor(actor: Option<&Actor>) -> Result<&Actor, CoreError> {
    actor.ok_or_else(|| CoreError::Unauthorized("Authentication required".into()))
}

/// Log a store failure and replace it with an opaque internal error.
fn store_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Listing store operation failed");
    CoreError::Internal("Listing store operation failed".into())
}

fn snapshot_error(err: serde_json::Error) -> CoreError {
    tracing::error!(error = %err, "Failed to serialize audit snapshot");
    CoreError::Internal("Failed to serialize audit snapshot".into())
}
