//! Page-number pagination helpers.
//!
//! Pages are 1-based. Page size is supplied by configuration; the helpers here
//! only clamp and convert.

/// Page size used by the listing dashboard when none is configured.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size accepted from configuration.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page number to 1 or above.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: i64) -> i64 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

/// Row offset for a 1-based page: `(page - 1) * page_size`.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_size)
}

/// Number of pages needed to show `total` rows.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}
