//! User entity model and DTOs.

use rentdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}
