//! EdilHub Server: workflow notification center.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use edilhub_api::{AppState, build_app};
use edilhub_core::config::AppConfig;
use edilhub_core::error::AppError;
use edilhub_core::traits::KeyValueStore;
use edilhub_database::{
    DatabasePool, FileKeyValueStore, MemoryKeyValueStore, MemoryNotificationStore,
    NotificationStore,
};
use edilhub_service::PreferenceStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("EDILHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting EdilHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Notification store ───────────────────────────────
    let db_pool = if config.database.is_memory() {
        None
    } else {
        let pool = DatabasePool::connect(&config.database).await?;
        if config.database.run_migrations {
            edilhub_database::migration::run_migrations(pool.pool()).await?;
        }
        Some(pool)
    };

    let store: Arc<dyn NotificationStore> = match &db_pool {
        Some(pool) => Arc::new(pool.repository()),
        None => {
            tracing::warn!("Using in-memory notification store; data is lost on restart");
            Arc::new(MemoryNotificationStore::new())
        }
    };

    // ── Step 2: UI preferences ───────────────────────────────────
    let port: Arc<dyn KeyValueStore> = if config.preferences.is_memory() {
        Arc::new(MemoryKeyValueStore::new())
    } else {
        tracing::info!(path = %config.preferences.path, "Opening preference file");
        Arc::new(FileKeyValueStore::open(&config.preferences.path).await?)
    };
    let preferences = Arc::new(PreferenceStore::load(port).await?);

    if !config.assistant.is_configured() {
        tracing::warn!("AI assistant API key not set; /functions/v1/ai-assistant will fail");
    }

    // ── Step 3: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(AppState::new(config, store, preferences));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("EdilHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 4: Release resources ────────────────────────────────
    if let Some(pool) = db_pool {
        if tokio::time::timeout(grace, pool.close()).await.is_err() {
            tracing::warn!("Database pool did not close within the grace period");
        }
    }

    tracing::info!("EdilHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
