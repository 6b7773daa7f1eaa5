//! PostgreSQL pool for the notification repository.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use edilhub_core::config::database::DatabaseConfig;
use edilhub_core::error::{AppError, ErrorKind};
use edilhub_core::result::AppResult;

use crate::repositories::NotificationRepository;

/// Connection pool behind the `workflow_notifications` repository.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool and verify that the server answers.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            "Connecting to notification database"
        );

        let pool = pool_options(config)
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to notification database: {e}"),
                    e,
                )
            })?;
        ping(&pool).await?;

        info!("Notification database ready");
        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// A notification repository sharing this pool.
    pub fn repository(&self) -> NotificationRepository {
        NotificationRepository::new(self.pool.clone())
    }

    /// Check that the server answers a trivial query.
    pub async fn health_check(&self) -> AppResult<()> {
        ping(&self.pool).await
    }

    /// Close all connections, waiting for checked-out ones to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Notification database pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// Round-trip `SELECT 1` on `pool`.
pub(crate) async fn ping(pool: &PgPool) -> AppResult<()> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Database health check failed", e))?;
    debug!("Notification database answered health check");
    Ok(())
}

/// Hide credentials in a connection URL before it is logged.
///
/// Covers both `user:password@host` and a `password=` query parameter.
pub fn redact_url(url: &str) -> String {
    let mut redacted = url.to_string();

    let authority_start = url.find("://").map_or(0, |p| p + 3);
    let authority_end = url[authority_start..]
        .find(['/', '?'])
        .map_or(url.len(), |p| authority_start + p);
    if let Some(at) = url[authority_start..authority_end].rfind('@') {
        let userinfo = &url[authority_start..authority_start + at];
        if let Some(colon) = userinfo.find(':') {
            redacted = format!(
                "{}****{}",
                &url[..authority_start + colon + 1],
                &url[authority_start + at..]
            );
        }
    }

    if let Some(query_start) = redacted.find('?') {
        let (base, query) = redacted.split_at(query_start + 1);
        let query = query
            .split('&')
            .map(|pair| match pair.split_once('=') {
                Some((key, _)) if key.eq_ignore_ascii_case("password") => format!("{key}=****"),
                _ => pair.to_string(),
            })
            .collect::<Vec<_>>()
            .join("&");
        redacted = format!("{base}{query}");
    }

    redacted
}
