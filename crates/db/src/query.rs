//! Listing query builder.
//!
//! Turns a (status filter, search text, page) triple into SQL text plus an
//! ordered list of bind values. User input only ever reaches the database as
//! a bound parameter; the SQL text is assembled from constants.

use rentdesk_core::error::CoreError;
use rentdesk_core::listing::{ListingStatus, StatusFilter};
use rentdesk_core::pagination::{clamp_page, clamp_page_size, page_offset};

/// Column list for `listings` SELECT queries.
pub(crate) const LISTING_COLUMNS: &str = "\
    id, title, description, make, model, year, price_per_day, location, \
    image_url, status, created_at, updated_at, approved_by, approved_at";

/// Columns matched by free-text search.
const SEARCH_COLUMNS: &[&str] = &["title", "make", "model", "location"];

/// Escape character used in `LIKE ... ESCAPE` clauses.
const LIKE_ESCAPE: char = '\\';

/// Typed bind value for the dynamically-built listing query.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
}

/// A fully-resolved, parameterized read against the `listings` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    /// Exact status to match, or `None` for all statuses.
    pub status: Option<ListingStatus>,
    /// Trimmed, non-empty search text.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
}

impl ListingQuery {
    /// Build a query from an already-parsed filter.
    ///
    /// Blank search text imposes no predicate. Pages below 1 are clamped to 1.
    pub fn new(filter: StatusFilter, search_text: &str, page: i64, page_size: i64) -> Self {
        let search = search_text.trim();
        Self {
            status: filter.status(),
            search: (!search.is_empty()).then(|| search.to_string()),
            page: clamp_page(Some(page)),
            page_size: clamp_page_size(page_size),
        }
    }

    /// Build a query from a raw filter keyword (`all`, `pending`, ...).
    pub fn parse(
        status_filter: &str,
        search_text: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Self, CoreError> {
        let filter: StatusFilter = status_filter.parse()?;
        Ok(Self::new(filter, search_text, page, page_size))
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    /// Build the WHERE clause and its bind values.
    ///
    /// The clause is empty when no predicate applies, otherwise it starts with
    /// `WHERE `. Predicates are joined with AND.
    pub fn where_clause(&self) -> (String, Vec<BindValue>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_values: Vec<BindValue> = Vec::new();

        if let Some(status) = self.status {
            conditions.push("status = ?".to_string());
            bind_values.push(BindValue::Text(status.as_str().to_string()));
        }

        if let Some(ref search) = self.search {
            let pattern = format!("%{}%", escape_like(search));
            let matches: Vec<String> = SEARCH_COLUMNS
                .iter()
                .map(|col| format!("{col} LIKE ? ESCAPE '{LIKE_ESCAPE}'"))
                .collect();
            conditions.push(format!("({})", matches.join(" OR ")));
            for _ in SEARCH_COLUMNS {
                bind_values.push(BindValue::Text(pattern.clone()));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, bind_values)
    }

    /// SQL for one page of items. Bind [`Self::select_binds`] in order.
    pub fn select_sql(&self) -> String {
        let (where_clause, _) = self.where_clause();
        format!(
            "SELECT {LISTING_COLUMNS} FROM listings {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ? OFFSET ?"
        )
    }

    /// Bind values for [`Self::select_sql`]: filter values, then limit and offset.
    pub fn select_binds(&self) -> Vec<BindValue> {
        let (_, mut bind_values) = self.where_clause();
        bind_values.push(BindValue::BigInt(self.page_size));
        bind_values.push(BindValue::BigInt(self.offset()));
        bind_values
    }

    /// SQL counting every row that matches the filter, ignoring pagination.
    pub fn count_sql(&self) -> String {
        let (where_clause, _) = self.where_clause();
        format!("SELECT COUNT(*) FROM listings {where_clause}")
    }

    /// Bind values for [`Self::count_sql`].
    pub fn count_binds(&self) -> Vec<BindValue> {
        self.where_clause().1
    }
}

/// Escape `LIKE` wildcards so user text matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_with_empty_search_has_no_predicate() {
        let q = ListingQuery::parse("all", "", 1, 10).unwrap();
        let (clause, binds) = q.where_clause();
        assert!(clause.is_empty());
        assert!(binds.is_empty());
        assert_eq!(
            q.select_binds(),
            vec![BindValue::BigInt(10), BindValue::BigInt(0)]
        );
    }

    #[test]
    fn status_filter_binds_exact_status() {
        let q = ListingQuery::parse("rejected", "", 1, 10).unwrap();
        let (clause, binds) = q.where_clause();
        assert_eq!(clause, "WHERE status = ?");
        assert_eq!(binds, vec![BindValue::Text("rejected".into())]);
    }

    #[test]
    fn search_matches_four_columns_with_or() {
        let q = ListingQuery::parse("all", "toy", 1, 10).unwrap();
        let (clause, binds) = q.where_clause();
        assert!(clause.starts_with("WHERE ("));
        assert_eq!(clause.matches(" OR ").count(), 3);
        for col in SEARCH_COLUMNS {
            assert!(clause.contains(&format!("{col} LIKE ?")));
        }
        assert_eq!(binds.len(), 4);
        assert!(binds.iter().all(|b| *b == BindValue::Text("%toy%".into())));
    }

    #[test]
    fn status_and_search_are_joined_with_and() {
        let q = ListingQuery::parse("approved", "bmw", 1, 10).unwrap();
        let (clause, binds) = q.where_clause();
        assert!(clause.starts_with("WHERE status = ? AND ("));
        assert_eq!(binds.len(), 5);
        assert_eq!(binds[0], BindValue::Text("approved".into()));
    }

    #[test]
    fn user_text_never_appears_in_sql() {
        let hostile = "'; DROP TABLE listings; --";
        let q = ListingQuery::parse("all", hostile, 1, 10).unwrap();
        assert!(!q.select_sql().contains("DROP"));
        assert!(!q.count_sql().contains("DROP"));
    }

    #[test]
    fn blank_search_is_ignored() {
        let q = ListingQuery::parse("all", "   ", 1, 10).unwrap();
        assert_eq!(q.search, None);
    }

    #[test]
    fn page_two_offsets_by_page_size() {
        let q = ListingQuery::parse("all", "", 2, 10).unwrap();
        assert_eq!(q.offset(), 10);
        assert_eq!(
            q.select_binds(),
            vec![BindValue::BigInt(10), BindValue::BigInt(10)]
        );
    }

    #[test]
    fn page_zero_is_clamped_to_first_page() {
        let q = ListingQuery::parse("all", "", 0, 10).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn unknown_status_filter_is_rejected() {
        assert!(ListingQuery::parse("archived", "", 1, 10).is_err());
    }

    #[test]
    fn count_sql_has_no_pagination() {
        let q = ListingQuery::parse("pending", "", 3, 10).unwrap();
        assert!(!q.count_sql().contains("LIMIT"));
        assert_eq!(q.count_binds().len(), 1);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
