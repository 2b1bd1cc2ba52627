use crate::auth::jwt::SessionConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite database URL (default: `sqlite://rentdesk.db`).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Listings per dashboard page (default: `10`).
    pub listings_page_size: i64,
    /// Default number of entries in the recent-activity view (default: `100`).
    pub audit_log_limit: i64,
    /// Username of the account created on first run (default: `admin`).
    pub seed_admin_username: String,
    /// Password of the account created on first run (default: `admin123`).
    pub seed_admin_password: String,
    /// Session token configuration (secret, lifetime, cookie flags).
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `DATABASE_URL`          | `sqlite://rentdesk.db`     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `LISTINGS_PAGE_SIZE`    | `10`                       |
    /// | `AUDIT_LOG_LIMIT`       | `100`                      |
    /// | `SEED_ADMIN_USERNAME`   | `admin`                    |
    /// | `SEED_ADMIN_PASSWORD`   | `admin123`                 |
    ///
    /// Session variables are documented on [`SessionConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://rentdesk.db".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let listings_page_size: i64 = std::env::var("LISTINGS_PAGE_SIZE")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("LISTINGS_PAGE_SIZE must be a valid i64");

        let audit_log_limit: i64 = std::env::var("AUDIT_LOG_LIMIT")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("AUDIT_LOG_LIMIT must be a valid i64");

        let seed_admin_username =
            std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let seed_admin_password =
            std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());

        let session = SessionConfig::from_env();

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            listings_page_size,
            audit_log_limit,
            seed_admin_username,
            seed_admin_password,
            session,
        }
    }
}
