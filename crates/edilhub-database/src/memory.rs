//! In-process notification store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use edilhub_core::error::AppError;
use edilhub_core::result::AppResult;
use edilhub_entity::notification::{NewNotification, Notification};

use crate::store::{NotificationStore, check_version, not_found};

/// Notification store held in memory.
///
/// Used when `database.url` is `memory://` and in tests. While marked
/// unavailable every call fails with a `Database` error, as a lost
/// connection would.
#[derive(Debug)]
pub struct MemoryNotificationStore {
    records: RwLock<HashMap<Uuid, Notification>>,
    available: AtomicBool,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = Notification>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().map(|n| (n.id, n)).collect()),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle simulated availability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::database("Notification store unavailable"))
        }
    }
}

impl Default for MemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Notification>> {
        self.ensure_available()?;
        let records = self.records.read().await;
        let mut list: Vec<Notification> = records.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        list.truncate(limit);
        Ok(list)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Notification>> {
        self.ensure_available()?;
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        self.ensure_available()?;
        let n = Notification::create(new, Utc::now());
        self.records.write().await.insert(n.id, n.clone());
        Ok(n)
    }

    async fn mark_read(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        expected_version: Option<i64>,
    ) -> AppResult<Notification> {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let n = records.get_mut(&id).ok_or_else(|| not_found(id))?;
        check_version(n, expected_version)?;
        n.mark_read(now);
        Ok(n.clone())
    }

    async fn mark_all_read(&self, now: DateTime<Utc>) -> AppResult<u64> {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let mut changed = 0;
        for n in records.values_mut() {
            if n.mark_read(now) {
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn archive(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<Notification> {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let n = records.get_mut(&id).ok_or_else(|| not_found(id))?;
        check_version(n, expected_version)?;
        n.archive();
        Ok(n.clone())
    }

    async fn delete(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<()> {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let n = records.get(&id).ok_or_else(|| not_found(id))?;
        check_version(n, expected_version)?;
        records.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        self.ensure_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use edilhub_core::error::ErrorKind;
    use edilhub_entity::notification::{
        EntityKind, NotificationKind, NotificationState, Priority,
    };

    fn new_notification(titolo: &str) -> NewNotification {
        NewNotification {
            tipo: NotificationKind::Scadenza,
            entita_tipo: EntityKind::Fattura,
            entita_id: "FT-2024-0042".to_string(),
            titolo: titolo.to_string(),
            messaggio: "Scadenza pagamento tra 3 giorni".to_string(),
            priorita: Priority::Alta,
            azione_suggerita: None,
            link_azione: None,
        }
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first_and_limits() {
        let now = Utc::now();
        let records = (0..5).map(|i| {
            let mut n = Notification::create(new_notification(&format!("n{i}")), now);
            n.created_at = now + Duration::seconds(i);
            n
        });
        let store = MemoryNotificationStore::with_records(records);

        let list = store.list_recent(3).await.unwrap();
        let titles: Vec<_> = list.iter().map(|n| n.titolo.as_str()).collect();
        assert_eq!(titles, vec!["n4", "n3", "n2"]);
    }

    #[tokio::test]
    async fn test_mark_read_then_archive() {
        let store = MemoryNotificationStore::new();
        let n = store.insert(new_notification("a")).await.unwrap();

        let read = store.mark_read(n.id, Utc::now(), Some(1)).await.unwrap();
        assert_eq!(read.stato, NotificationState::Letta);
        assert_eq!(read.version, 2);

        let archived = store.archive(n.id, None).await.unwrap();
        assert_eq!(archived.stato, NotificationState::Archiviata);
        assert_eq!(archived.letta_at, read.letta_at);
    }

    #[tokio::test]
    async fn test_stale_version_conflicts_and_leaves_record() {
        let store = MemoryNotificationStore::new();
        let n = store.insert(new_notification("a")).await.unwrap();
        store.archive(n.id, Some(1)).await.unwrap();

        let err = store.delete(n.id, Some(1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(store.get(n.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let store = MemoryNotificationStore::new();
        let err = store.mark_read(Uuid::new_v4(), Utc::now(), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_mark_all_read_counts_only_unread() {
        let store = MemoryNotificationStore::new();
        for i in 0..4 {
            store.insert(new_notification(&format!("n{i}"))).await.unwrap();
        }
        let first = store.list_recent(10).await.unwrap()[0].id;
        store.archive(first, None).await.unwrap();

        assert_eq!(store.mark_all_read(Utc::now()).await.unwrap(), 3);
        assert_eq!(store.mark_all_read(Utc::now()).await.unwrap(), 0);
        let unread = store
            .list_recent(10)
            .await
            .unwrap()
            .into_iter()
            .filter(Notification::is_unread)
            .count();
        assert_eq!(unread, 0);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryNotificationStore::new();
        store.set_available(false);
        assert_eq!(
            store.list_recent(10).await.unwrap_err().kind,
            ErrorKind::Database
        );
        assert!(store.health_check().await.is_err());
        store.set_available(true);
        assert!(store.health_check().await.is_ok());
    }
}
