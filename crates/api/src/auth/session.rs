//! Session resolution.
//!
//! Handlers never inspect tokens directly. They ask the [`SessionGuard`] in
//! [`AppState`](crate::state::AppState) for the acting administrator, which
//! lets tests swap in [`FixedSessionGuard`].

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use rentdesk_core::actor::Actor;

use super::jwt::{validate_token, SessionConfig, SESSION_COOKIE};

/// Resolves the authenticated actor for a request, if any.
pub trait SessionGuard: Send + Sync {
    /// Return the actor behind a valid session, or `None`.
    fn resolve(&self, headers: &HeaderMap) -> Option<Actor>;
}

// ---------------------------------------------------------------------------
// JWT guard
// ---------------------------------------------------------------------------

/// Production guard: validates an HS256 session token from the `session`
/// cookie or an `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct JwtSessionGuard {
    config: SessionConfig,
}

impl JwtSessionGuard {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

impl SessionGuard for JwtSessionGuard {
    fn resolve(&self, headers: &HeaderMap) -> Option<Actor> {
        let token = session_token(headers)?;
        match validate_token(&token, &self.config) {
            Ok(claims) => Some(claims.actor()),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                None
            }
        }
    }
}

/// Extract the raw session token. The cookie wins over the Bearer header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SESSION_COOKIE).or_else(|| bearer_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Find a cookie by name across all `Cookie` headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

// ---------------------------------------------------------------------------
// Fixed guard
// ---------------------------------------------------------------------------

/// Guard that ignores the request and always resolves the same result.
#[derive(Debug, Clone, Default)]
pub struct FixedSessionGuard {
    actor: Option<Actor>,
}

impl FixedSessionGuard {
    /// Every request is authenticated as `actor`.
    pub fn signed_in(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    /// Every request is anonymous.
    pub fn anonymous() -> Self {
        Self { actor: None }
    }
}

impl SessionGuard for FixedSessionGuard {
    fn resolve(&self, _headers: &HeaderMap) -> Option<Actor> {
        self.actor.clone()
    }
}
