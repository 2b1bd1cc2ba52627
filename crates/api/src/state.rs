use std::sync::Arc;

use rentdesk_db::moderation::ModerationService;

use crate::auth::session::SessionGuard;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rentdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Audit-logged moderation workflow over `pool`.
    pub moderation: ModerationService,
    /// Resolves the acting administrator from request headers.
    pub session_guard: Arc<dyn SessionGuard>,
}

impl AppState {
    pub fn new(
        pool: rentdesk_db::DbPool,
        config: ServerConfig,
        session_guard: Arc<dyn SessionGuard>,
    ) -> Self {
        let moderation = ModerationService::new(pool.clone(), config.listings_page_size);
        Self {
            pool,
            config: Arc::new(config),
            moderation,
            session_guard,
        }
    }
}
