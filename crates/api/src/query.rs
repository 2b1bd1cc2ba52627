//! Shared query parameter types for API handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;

/// Query-string extractor whose rejection uses the JSON error envelope.
///
/// A malformed value such as `?page=abc` becomes a 400 `BAD_REQUEST` instead
/// of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::try_from_uri(&parts.uri)
            .map(|Query(params)| QueryParams(params))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

/// Parameters for the listing dashboard (`?status=&search=&page=`).
///
/// Missing values mean "all statuses", "no search", and page 1.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQueryParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
}

/// Parameters for audit reads (`?limit=`). Clamped in `rentdesk_core::audit`.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
