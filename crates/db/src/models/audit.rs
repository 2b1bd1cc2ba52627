//! Audit log entity models and DTOs.
//!
//! Audit logs have no `updated_at` field (immutable records). The
//! `old_values` / `new_values` columns hold opaque JSON text whose shape
//! depends on the action.

use rentdesk_core::audit::display_title;
use rentdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub listing_id: Option<DbId>,
    pub admin_username: String,
    pub action: String,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a new audit log entry. `id` and `created_at` are
/// assigned by the database.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuditLog {
    pub listing_id: Option<DbId>,
    pub admin_username: String,
    pub action: String,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
}

/// Audit row left-joined with the title of its listing, if it still resolves.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogWithTitle {
    pub id: DbId,
    pub listing_id: Option<DbId>,
    pub admin_username: String,
    pub action: String,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
    pub created_at: Timestamp,
    pub listing_title: Option<String>,
}

/// Audit entry as shown in the activity view.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogView {
    pub id: DbId,
    pub listing_id: Option<DbId>,
    pub admin_username: String,
    pub action: String,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
    pub created_at: Timestamp,
    /// Listing title, or `"Listing #{id}"` when the listing does not resolve.
    pub listing_title: String,
}

impl From<AuditLogWithTitle> for AuditLogView {
    fn from(row: AuditLogWithTitle) -> Self {
        let listing_title = display_title(row.listing_title.as_deref(), row.listing_id);
        Self {
            id: row.id,
            listing_id: row.listing_id,
            admin_username: row.admin_username,
            action: row.action,
            old_values: row.old_values,
            new_values: row.new_values,
            created_at: row.created_at,
            listing_title,
        }
    }
}
