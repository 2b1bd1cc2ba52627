//! Repository for the `audit_logs` table.
//!
//! Append-only: no update or delete is exposed, and triggers in the migration
//! reject both at the database level.

use rentdesk_core::types::DbId;
use sqlx::{Executor, Sqlite};

use crate::models::audit::{AuditLog, AuditLogView, AuditLogWithTitle, CreateAuditLog};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `audit_logs` SELECT queries.
const COLUMNS: &str = "\
    id, listing_id, admin_username, action, old_values, new_values, created_at";

/// Column list for the listing-title join (table alias `al`, listings `l`).
const VIEW_COLUMNS: &str = "\
    al.id, al.listing_id, al.admin_username, al.action, al.old_values, \
    al.new_values, al.created_at, l.title AS listing_title";

/// Display order: newest first, insertion order within the same instant.
const VIEW_ORDER: &str = "ORDER BY al.created_at DESC, al.id ASC";

// ---------------------------------------------------------------------------
// AuditLogRepo
// ---------------------------------------------------------------------------

/// Provides append and read operations for audit logs.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append one entry, returning the stored row with its assigned id and
    /// timestamp.
    pub async fn append<'e, E>(executor: E, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "INSERT INTO audit_logs (listing_id, admin_username, action, old_values, new_values)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entry.listing_id)
            .bind(&entry.admin_username)
            .bind(&entry.action)
            .bind(&entry.old_values)
            .bind(&entry.new_values)
            .fetch_one(executor)
            .await
    }

    /// Most recent entries across all listings, joined with listing titles.
    pub async fn list_recent<'e, E>(executor: E, limit: i64) -> Result<Vec<AuditLogView>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM audit_logs al \
             LEFT JOIN listings l ON al.listing_id = l.id \
             {VIEW_ORDER} LIMIT ?"
        );
        let rows = sqlx::query_as::<_, AuditLogWithTitle>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(AuditLogView::from).collect())
    }

    /// Most recent entries for a single listing.
    pub async fn list_for_listing<'e, E>(
        executor: E,
        listing_id: DbId,
        limit: i64,
    ) -> Result<Vec<AuditLogView>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM audit_logs al \
             LEFT JOIN listings l ON al.listing_id = l.id \
             WHERE al.listing_id = ? \
             {VIEW_ORDER} LIMIT ?"
        );
        let rows = sqlx::query_as::<_, AuditLogWithTitle>(&query)
            .bind(listing_id)
            .bind(limit)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(AuditLogView::from).collect())
    }

    /// Count all entries.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(executor)
            .await
    }

    /// Count entries for a single listing.
    pub async fn count_for_listing<'e, E>(executor: E, listing_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM audit_logs WHERE listing_id = ?")
            .bind(listing_id)
            .fetch_one(executor)
            .await
    }
}
