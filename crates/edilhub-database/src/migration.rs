//! Embedded schema migrations for `workflow_notifications`.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{debug, info};

use edilhub_core::error::{AppError, ErrorKind};
use edilhub_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// The migrations compiled into this binary.
pub fn migrator() -> &'static Migrator {
    &MIGRATOR
}

/// Bring the notification schema up to the latest embedded version.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    for migration in MIGRATOR.iter() {
        debug!(
            version = migration.version,
            description = %migration.description,
            "Embedded migration"
        );
    }
    info!(
        count = MIGRATOR.iter().count(),
        latest = MIGRATOR.iter().map(|m| m.version).max(),
        "Applying workflow_notifications migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to migrate workflow_notifications: {e}"),
            e,
        )
    })?;

    info!("workflow_notifications schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_table_migration_embedded() {
        let migration = migrator()
            .iter()
            .find(|m| m.version == 20240601000000)
            .expect("workflow_notifications migration missing");
        assert_eq!(migration.description, "workflow notifications");
        assert!(migration.sql.contains("CREATE TABLE workflow_notifications"));
        assert!(migration.sql.contains("letta_requires_letta_at"));
    }
}
