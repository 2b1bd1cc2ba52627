//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rentdesk_core::actor::Actor;
use rentdesk_core::error::CoreError;
use rentdesk_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{clear_session_cookie, generate_session_token, session_cookie};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. Missing fields deserialize as empty
/// and are rejected by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login payload. The same token is also set as the session cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub user: Actor,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username and password are required".into(),
        )));
    }

    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username = %user.username, "Failed login attempt");
        return Err(invalid());
    }

    let session = &state.config.session;
    let token = generate_session_token(user.id, &user.username, &user.role, session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    let cookie = session_cookie(&token, session);
    let body = LoginResponse {
        token,
        expires_in: session.ttl_secs(),
        user: Actor::new(user.id, user.username, user.role),
    };

    Ok(([(SET_COOKIE, cookie)], Json(DataResponse { data: body })))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie. Tokens are stateless, so nothing is revoked
/// server-side.
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> impl IntoResponse {
    tracing::info!(user_id = actor.user_id, username = %actor.username, "User logged out");
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(&state.config.session))],
    )
}

/// GET /api/v1/auth/me
pub async fn me(AuthUser(actor): AuthUser) -> Json<DataResponse<Actor>> {
    Json(DataResponse { data: actor })
}
