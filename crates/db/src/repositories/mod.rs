//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! any sqlx executor as the first argument: `&DbPool` for standalone calls,
//! or `&mut *tx` to take part in an open transaction.

pub mod audit_repo;
pub mod listing_repo;
pub mod user_repo;

pub use audit_repo::AuditLogRepo;
pub use listing_repo::ListingRepo;
pub use user_repo::UserRepo;

/// SQL expression for the current UTC time in RFC 3339 with milliseconds.
///
/// Matches the column defaults in the migrations.
pub(crate) const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";
