//! Listing status lifecycle and moderation filter parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Moderation status of a listing. New listings start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// All statuses in display order.
pub const ALL_STATUSES: &[ListingStatus] = &[
    ListingStatus::Pending,
    ListingStatus::Approved,
    ListingStatus::Rejected,
];

impl ListingStatus {
    /// The value stored in the `listings.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Approved => "approved",
            ListingStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid listing status '{s}'. Must be one of: pending, approved, rejected"
                ))
            })
    }
}

impl TryFrom<String> for ListingStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

/// Keyword meaning "no status predicate".
pub const FILTER_ALL: &str = "all";

/// Status filter accepted by the listing query: `all` or an exact status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ListingStatus),
}

impl StatusFilter {
    /// The status to match exactly, or `None` for `All`.
    pub fn status(self) -> Option<ListingStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    /// Parse a filter keyword. An empty string is treated as `all`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == FILTER_ALL {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(FILTER_ALL),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Reject a negative or non-finite daily price.
pub fn validate_price_per_day(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(format!(
            "price_per_day must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
