//! Audit trail constants and display helpers.
//!
//! Audit entries are append-only. The before/after snapshots are opaque JSON
//! text whose shape depends on the action, so nothing here parses them.

use crate::pagination::clamp_limit;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action tags for audit log entries.
pub mod action_types {
    pub const APPROVE: &str = "approve";
    pub const REJECT: &str = "reject";
    pub const EDIT: &str = "edit";
    pub const CREATE: &str = "create";
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Default number of entries returned by the recent-activity view.
pub const DEFAULT_RECENT_LIMIT: i64 = 100;

/// Upper bound on entries returned by a single audit read.
pub const MAX_RECENT_LIMIT: i64 = 500;

/// Clamp a requested audit read size into `1..=MAX_RECENT_LIMIT`.
pub fn clamp_recent_limit(limit: Option<i64>) -> i64 {
    clamp_limit(limit, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Label shown for an entry whose target listing no longer resolves.
pub fn fallback_listing_label(listing_id: Option<DbId>) -> String {
    match listing_id {
        Some(id) => format!("Listing #{id}"),
        None => "Unknown listing".to_string(),
    }
}

/// Resolve the display title for an audit entry.
///
/// Uses the joined listing title when present, otherwise the fallback label.
pub fn display_title(listing_title: Option<&str>, listing_id: Option<DbId>) -> String {
    match listing_title {
        Some(title) => title.to_string(),
        None => fallback_listing_label(listing_id),
    }
}
