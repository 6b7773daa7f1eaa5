//! Notification store backed by the EdilHub HTTP API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use edilhub_core::error::{AppError, ErrorKind};
use edilhub_core::result::AppResult;
use edilhub_database::store::NotificationStore;
use edilhub_entity::notification::{NewNotification, Notification};

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct FeedPage {
    notifications: Vec<Notification>,
}

#[derive(Deserialize)]
struct Marked {
    marked: u64,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Talks to a running server's `/api/notifications` routes.
///
/// Archived records are not exposed by the feed route, so `list_recent`
/// only returns unarchived notifications.
#[derive(Debug, Clone)]
pub struct HttpNotificationStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotificationStore {
    /// Creates a store for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL of the server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            debug!(error = %e, "Request to server failed");
            AppError::with_source(ErrorKind::ExternalService, "Server unreachable", e)
        })?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Server replied");
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_default();
        let message = if message.is_empty() {
            format!("Server returned {status}")
        } else {
            message
        };

        Err(match status {
            StatusCode::NOT_FOUND => AppError::not_found(message),
            StatusCode::CONFLICT => AppError::conflict(message),
            StatusCode::BAD_REQUEST => AppError::validation(message),
            _ => AppError::external(message),
        })
    }

    async fn data<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> AppResult<T> {
        let response = self.send(request).await?;
        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Malformed server response", e)
        })?;
        Ok(envelope.data)
    }
}

fn version_query(expected_version: Option<i64>) -> String {
    expected_version
        .map(|v| format!("?expected_version={v}"))
        .unwrap_or_default()
}

#[async_trait]
impl NotificationStore for HttpNotificationStore {
    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Notification>> {
        let url = self.url(&format!("/notifications?filter=all&limit={limit}"));
        let page: FeedPage = self.data(self.client.get(url)).await?;
        Ok(page.notifications)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let url = self.url(&format!("/notifications/{id}"));
        match self.data(self.client.get(url)).await {
            Ok(n) => Ok(Some(n)),
            Err(e) if e.kind == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        let url = self.url("/notifications");
        self.data(self.client.post(url).json(&new)).await
    }

    async fn mark_read(
        &self,
        id: Uuid,
        _now: DateTime<Utc>,
        expected_version: Option<i64>,
    ) -> AppResult<Notification> {
        let url = self.url(&format!(
            "/notifications/{id}/read{}",
            version_query(expected_version)
        ));
        self.data(self.client.put(url)).await
    }

    async fn mark_all_read(&self, _now: DateTime<Utc>) -> AppResult<u64> {
        let url = self.url("/notifications/read-all");
        let marked: Marked = self.data(self.client.put(url)).await?;
        Ok(marked.marked)
    }

    async fn archive(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<Notification> {
        let url = self.url(&format!(
            "/notifications/{id}/archive{}",
            version_query(expected_version)
        ));
        self.data(self.client.put(url)).await
    }

    async fn delete(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<()> {
        let url = self.url(&format!(
            "/notifications/{id}{}",
            version_query(expected_version)
        ));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        self.send(self.client.get(self.url("/health"))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification_json(id: Uuid, version: i64) -> serde_json::Value {
        json!({
            "id": id,
            "tipo": "scadenza",
            "entita_tipo": "fattura",
            "entita_id": "FT-2024-118",
            "titolo": "Fattura in scadenza",
            "messaggio": "Scade tra 3 giorni",
            "priorita": "alta",
            "stato": "non_letta",
            "azione_suggerita": null,
            "link_azione": null,
            "created_at": "2024-06-01T08:00:00Z",
            "letta_at": null,
            "version": version,
            "display": { "icon": "clock" }
        })
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let _m = server
            .mock("GET", format!("/api/notifications/{id}").as_str())
            .with_status(404)
            .with_body(r#"{"error":"NOT_FOUND","message":"missing"}"#)
            .create_async()
            .await;

        let store = HttpNotificationStore::new(&server.url());
        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stale_version_maps_to_conflict() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let _m = server
            .mock(
                "PUT",
                format!("/api/notifications/{id}/read?expected_version=1").as_str(),
            )
            .with_status(409)
            .with_body(r#"{"error":"CONFLICT","message":"version 2, expected 1"}"#)
            .create_async()
            .await;

        let store = HttpNotificationStore::new(&server.url());
        let err = store.mark_read(id, Utc::now(), Some(1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "version 2, expected 1");
    }

    #[tokio::test]
    async fn test_list_recent_reads_feed_page() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let body = json!({
            "success": true,
            "data": {
                "filter": "all",
                "notifications": [notification_json(id, 3)],
                "stale": false
            }
        });
        let _m = server
            .mock("GET", "/api/notifications?filter=all&limit=10")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let store = HttpNotificationStore::new(&format!("{}/", server.url()));
        let feed = store.list_recent(10).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, id);
        assert_eq!(feed[0].version, 3);
    }

    #[tokio::test]
    async fn test_server_error_is_external() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("PUT", "/api/notifications/read-all")
            .with_status(503)
            .create_async()
            .await;

        let store = HttpNotificationStore::new(&server.url());
        let err = store.mark_all_read(Utc::now()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
