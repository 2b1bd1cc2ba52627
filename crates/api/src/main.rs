use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rentdesk_api::auth::password::hash_password;
use rentdesk_api::auth::session::JwtSessionGuard;
use rentdesk_api::config::ServerConfig;
use rentdesk_api::router::build_app_router;
use rentdesk_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rentdesk_api=debug,rentdesk_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = rentdesk_db::create_pool(&config.database_url)
        .await
        .expect("Failed to open database");
    tracing::info!(url = %config.database_url, "Database connection pool created");

    rentdesk_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    rentdesk_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Seed data ---
    let admin_hash =
        hash_password(&config.seed_admin_password).expect("Failed to hash seed admin password");
    rentdesk_db::seed::seed_defaults(&pool, &config.seed_admin_username, &admin_hash)
        .await
        .expect("Failed to seed default data");

    // --- App state ---
    let session_guard = Arc::new(JwtSessionGuard::new(config.session.clone()));
    let state = AppState::new(pool.clone(), config.clone(), session_guard);

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database pool");
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, pool.close()).await.is_err() {
        tracing::warn!(timeout_secs = config.shutdown_timeout_secs, "Database pool did not close in time");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
