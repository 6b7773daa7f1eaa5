//! PostgreSQL-backed notification store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use edilhub_core::error::{AppError, ErrorKind};
use edilhub_core::result::AppResult;
use edilhub_entity::notification::{NewNotification, Notification};

use crate::store::{NotificationStore, check_version, not_found};

/// Repository over the `workflow_notifications` table.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))
    }

    /// Load and row-lock a notification inside `tx`.
    async fn lock(
        tx: &mut Transaction<'static, Postgres>,
        id: Uuid,
    ) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM workflow_notifications WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load notification", e))?
        .ok_or_else(|| not_found(id))
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM workflow_notifications ORDER BY created_at DESC, id LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM workflow_notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to get notification", e))
    }

    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        let n = Notification::create(new, Utc::now());
        sqlx::query_as::<_, Notification>(
            "INSERT INTO workflow_notifications \
             (id, tipo, entita_tipo, entita_id, titolo, messaggio, priorita, stato, \
              azione_suggerita, link_azione, created_at, letta_at, version) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(n.id)
        .bind(n.tipo)
        .bind(n.entita_tipo)
        .bind(&n.entita_id)
        .bind(&n.titolo)
        .bind(&n.messaggio)
        .bind(n.priorita)
        .bind(n.stato)
        .bind(&n.azione_suggerita)
        .bind(&n.link_azione)
        .bind(n.created_at)
        .bind(n.letta_at)
        .bind(n.version)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
    }

    async fn mark_read(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        expected_version: Option<i64>,
    ) -> AppResult<Notification> {
        let mut tx = self.begin().await?;
        let mut n = Self::lock(&mut tx, id).await?;
        check_version(&n, expected_version)?;

        if n.mark_read(now) {
            sqlx::query(
                "UPDATE workflow_notifications SET stato = $2, letta_at = $3, version = $4 WHERE id = $1",
            )
            .bind(id)
            .bind(n.stato)
            .bind(n.letta_at)
            .bind(n.version)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        }

        Self::commit(tx).await?;
        Ok(n)
    }

    async fn mark_all_read(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE workflow_notifications \
             SET stato = 'letta', letta_at = $1, version = version + 1 \
             WHERE stato = 'non_letta'",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    async fn archive(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<Notification> {
        let mut tx = self.begin().await?;
        let mut n = Self::lock(&mut tx, id).await?;
        check_version(&n, expected_version)?;

        if n.archive() {
            sqlx::query("UPDATE workflow_notifications SET stato = $2, version = $3 WHERE id = $1")
                .bind(id)
                .bind(n.stato)
                .bind(n.version)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to archive notification", e)
                })?;
        }

        Self::commit(tx).await?;
        Ok(n)
    }

    async fn delete(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<()> {
        let mut tx = self.begin().await?;
        let n = Self::lock(&mut tx, id).await?;
        check_version(&n, expected_version)?;

        sqlx::query("DELETE FROM workflow_notifications WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;

        Self::commit(tx).await
    }

    async fn health_check(&self) -> AppResult<()> {
        crate::connection::ping(&self.pool).await
    }
}
