//! Session token generation/validation and session cookie helpers.
//!
//! Session tokens are HS256-signed JWTs carrying a [`Claims`] payload. The
//! browser receives them in an `HttpOnly` cookie; API clients may send them as
//! a Bearer token instead.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rentdesk_core::actor::Actor;
use rentdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// Default session lifetime in hours.
const DEFAULT_TTL_HOURS: i64 = 24;

/// Longest accepted session lifetime (one year).
pub const MAX_TTL_HOURS: i64 = 24 * 365;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub username: String,
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

impl Claims {
    /// The actor this token authenticates.
    pub fn actor(&self) -> Actor {
        Actor::new(self.sub, self.username.clone(), self.role.clone())
    }
}

/// Configuration for session tokens and the session cookie.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token and cookie lifetime in hours (default: 24).
    pub ttl_hours: i64,
    /// Add the `Secure` attribute to the session cookie (default: false).
    pub secure_cookies: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var             | Required | Default |
    /// |---------------------|----------|---------|
    /// | `SESSION_SECRET`    | **yes**  | --      |
    /// | `SESSION_TTL_HOURS` | no       | `24`    |
    /// | `SECURE_COOKIES`    | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty, or if
    /// `SESSION_TTL_HOURS` is outside `1..=MAX_TTL_HOURS`.
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");
        assert!(
            (1..=MAX_TTL_HOURS).contains(&ttl_hours),
            "SESSION_TTL_HOURS must be between 1 and {MAX_TTL_HOURS}"
        );

        let secure_cookies: bool = std::env::var("SECURE_COOKIES")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SECURE_COOKIES must be true or false");

        Self {
            secret,
            ttl_hours,
            secure_cookies,
        }
    }

    /// Session lifetime in seconds, with the hour count clamped to
    /// `1..=MAX_TTL_HOURS`.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_hours.clamp(1, MAX_TTL_HOURS) * 3600
    }
}

/// Generate an HS256 session token for the given user.
pub fn generate_session_token(
    user_id: DbId,
    username: &str,
    role: &str,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role: role.to_string(),
        exp: now.saturating_add(config.ttl_secs()),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// `Set-Cookie` value that stores `token` as the session.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        config.ttl_secs()
    );
    if config.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0");
    if config.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}
