//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rentdesk_core::actor::Actor;
use rentdesk_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated administrator resolved by the session guard.
///
/// Use this as an extractor parameter in any handler that requires a session:
///
/// ```ignore
/// async fn my_handler(AuthUser(actor): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(actor = %actor.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .session_guard
            .resolve(&parts.headers)
            .map(AuthUser)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Authentication required".into(),
                ))
            })
    }
}
