//! Listing entity model and DTOs.

use rentdesk_core::listing::ListingStatus;
use rentdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `listings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Listing {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub location: String,
    pub image_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ListingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub approved_by: Option<String>,
    pub approved_at: Option<Timestamp>,
}

/// DTO for inserting a new listing. Status always starts as `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListing {
    pub title: String,
    pub description: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub location: String,
    pub image_url: Option<String>,
}

/// DTO for editing the descriptive fields of a listing.
///
/// Absent fields keep their stored value. The nullable columns use a double
/// option: `None` when the key is absent, `Some(None)` when it was submitted
/// as `null`, which clears the column. Serializes only the fields that were
/// submitted, which is what the edit audit entry records as "after".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "submitted",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_day: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "submitted",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
}

/// Wrap any submitted value, `null` included, in `Some`. Combined with
/// `#[serde(default)]` an absent key stays `None`.
fn submitted<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateListing {
    /// True when no field was submitted.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One page of a filtered listing query.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub items: Vec<Listing>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Listing counts per moderation status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingStats {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub total: i64,
}
