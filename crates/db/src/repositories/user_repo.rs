//! Repository for the `users` table.

use sqlx::{Executor, Sqlite};

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, role, created_at";

/// Provides lookup and insert operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateUser) -> Result<User, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "INSERT INTO users (username, password_hash, role)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(executor)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username<'e, E>(
        executor: E,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(executor)
            .await
    }

    /// Count all users.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await
    }
}
