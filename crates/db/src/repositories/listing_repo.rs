//! Repository for the `listings` table.

use rentdesk_core::listing::ListingStatus;
use rentdesk_core::types::DbId;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Executor, Sqlite, SqliteConnection};

use super::NOW;
use crate::models::listing::{CreateListing, Listing, ListingStats, UpdateListing};
use crate::query::{BindValue, ListingQuery, LISTING_COLUMNS as COLUMNS};

/// Listing store: filtered reads, field edits, and status transitions.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new `pending` listing, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateListing) -> Result<Listing, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "INSERT INTO listings
                (title, description, make, model, year, price_per_day, location, image_url)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.make)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.price_per_day)
            .bind(&input.location)
            .bind(&input.image_url)
            .fetch_one(executor)
            .await
    }

    /// Find a listing by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Listing>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = ?");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Run a listing query, returning one page of items and the total number
    /// of matching rows.
    ///
    /// Takes a connection rather than a generic executor because it issues two
    /// statements; pass `&mut *tx` to read both from one snapshot.
    pub async fn list(
        conn: &mut SqliteConnection,
        query: &ListingQuery,
    ) -> Result<(Vec<Listing>, i64), sqlx::Error> {
        let select_sql = query.select_sql();
        let select_binds = query.select_binds();
        let items = bind_values(sqlx::query_as::<_, Listing>(&select_sql), &select_binds)
            .fetch_all(&mut *conn)
            .await?;

        let count_sql = query.count_sql();
        let count_binds = query.count_binds();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for val in &count_binds {
            count_query = match val {
                BindValue::BigInt(v) => count_query.bind(*v),
                BindValue::Text(v) => count_query.bind(v.as_str()),
            };
        }
        let total = count_query.fetch_one(&mut *conn).await?;

        Ok((items, total))
    }

    /// Update descriptive fields. Only submitted fields in `input` are applied;
    /// a submitted `null` clears `description` or `image_url`. `updated_at` is
    /// always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_fields<'e, E>(
        executor: E,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "UPDATE listings SET
                title = COALESCE(?, title),
                description = CASE WHEN ? THEN ? ELSE description END,
                make = COALESCE(?, make),
                model = COALESCE(?, model),
                year = COALESCE(?, year),
                price_per_day = COALESCE(?, price_per_day),
                location = COALESCE(?, location),
                image_url = CASE WHEN ? THEN ? ELSE image_url END,
                updated_at = {NOW}
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(Option::as_deref))
            .bind(&input.make)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.price_per_day)
            .bind(&input.location)
            .bind(input.image_url.is_some())
            .bind(input.image_url.as_ref().and_then(Option::as_deref))
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Set the moderation status of a listing.
    ///
    /// Approval stamps `approved_by` / `approved_at`; any other status leaves
    /// them as they were. `updated_at` is always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status<'e, E>(
        executor: E,
        id: DbId,
        status: ListingStatus,
        actor: &str,
    ) -> Result<Option<Listing>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        match status {
            ListingStatus::Approved => {
                let query = format!(
                    "UPDATE listings SET
                        status = ?,
                        approved_by = ?,
                        approved_at = {NOW},
                        updated_at = {NOW}
                     WHERE id = ?
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Listing>(&query)
                    .bind(status.as_str())
                    .bind(actor)
                    .bind(id)
                    .fetch_optional(executor)
                    .await
            }
            ListingStatus::Pending | ListingStatus::Rejected => {
                let query = format!(
                    "UPDATE listings SET status = ?, updated_at = {NOW}
                     WHERE id = ?
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Listing>(&query)
                    .bind(status.as_str())
                    .bind(id)
                    .fetch_optional(executor)
                    .await
            }
        }
    }

    /// Count listings per status.
    pub async fn count_by_status<'e, E>(executor: E) -> Result<ListingStats, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM listings GROUP BY status",
        )
        .fetch_all(executor)
        .await?;

        let mut stats = ListingStats::default();
        for (status, count) in rows {
            match status.parse::<ListingStatus>() {
                Ok(ListingStatus::Pending) => stats.pending = count,
                Ok(ListingStatus::Approved) => stats.approved = count,
                Ok(ListingStatus::Rejected) => stats.rejected = count,
                Err(_) => tracing::warn!(status = %status, count, "Unknown listing status in store"),
            }
            stats.total += count;
        }
        Ok(stats)
    }

    /// Count all listings.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listings")
            .fetch_one(executor)
            .await
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for val in bind_values {
        q = match val {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
        };
    }
    q
}
