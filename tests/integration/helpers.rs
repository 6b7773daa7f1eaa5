//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use edilhub_api::{AppState, build_app};
use edilhub_core::config::AppConfig;
use edilhub_database::{MemoryKeyValueStore, MemoryNotificationStore};
use edilhub_entity::notification::{
    EntityKind, NewNotification, Notification, NotificationKind, NotificationState, Priority,
};
use edilhub_service::PreferenceStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing notification store, for seeding and outage simulation
    pub store: Arc<MemoryNotificationStore>,
    /// Wired application state
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with an empty store
    pub async fn new() -> Self {
        Self::with_records(AppConfig::default(), Vec::new()).await
    }

    /// Create a test application over `records`
    pub async fn with_records(config: AppConfig, records: Vec<Notification>) -> Self {
        let store = Arc::new(MemoryNotificationStore::with_records(records));
        let port = Arc::new(MemoryKeyValueStore::new());
        let preferences = Arc::new(
            PreferenceStore::load(port)
                .await
                .expect("Failed to load preferences"),
        );

        let state = AppState::new(config, store.clone(), preferences);
        let router = build_app(state.clone());

        Self {
            router,
            store,
            state,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// A notification created `minutes_ago` minutes in the past
pub fn notification(
    titolo: &str,
    priorita: Priority,
    stato: NotificationState,
    minutes_ago: i64,
) -> Notification {
    let mut n = Notification::create(
        NewNotification {
            tipo: NotificationKind::Approvazione,
            entita_tipo: EntityKind::Preventivo,
            entita_id: format!("PRV-{titolo}"),
            titolo: titolo.to_string(),
            messaggio: "Preventivo in attesa di approvazione".to_string(),
            priorita,
            azione_suggerita: Some("Approva".to_string()),
            link_azione: Some("/preventivi".to_string()),
        },
        Utc::now() - Duration::minutes(minutes_ago),
    );
    n.stato = stato;
    if stato == NotificationState::Letta {
        n.letta_at = Some(n.created_at);
    }
    n
}
