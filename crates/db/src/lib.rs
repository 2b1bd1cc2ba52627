//! SQLite persistence for the listing moderation back-office.
//!
//! - [`models`] -- row structs and DTOs.
//! - [`repositories`] -- zero-sized repositories over any sqlx executor.
//! - [`query`] -- the parameterized listing query builder.
//! - [`moderation`] -- the transactional moderation workflow.
//! - [`seed`] -- idempotent first-run data.

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod moderation;
pub mod models;
pub mod query;
pub mod repositories;
pub mod seed;

pub type DbPool = sqlx::SqlitePool;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL (e.g. `sqlite://rentdesk.db`).
///
/// The database file is created if missing and opened in WAL mode.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

/// Create a pool over a private in-memory database.
///
/// Holds exactly one connection that is never recycled, since an in-memory
/// SQLite database lives only as long as its connection.
pub async fn create_memory_pool() -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Migrations embedded from `crates/db/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply all pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Number of migrations embedded in this build.
pub fn known_migrations() -> i64 {
    MIGRATOR.iter().count() as i64
}

/// Number of migrations recorded as successfully applied to the database.
pub async fn applied_migrations(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(pool)
        .await
}
