//! Integration tests for the notification feed and transitions.

use axum::http::StatusCode;
use serde_json::json;

use edilhub_core::config::AppConfig;
use edilhub_entity::notification::{NotificationState, Priority};

use crate::helpers::{TestApp, notification};

async fn seeded() -> (TestApp, String, String) {
    let critical = notification("1", Priority::Critica, NotificationState::NonLetta, 1);
    let read = notification("2", Priority::Bassa, NotificationState::Letta, 5);
    let (critical_id, read_id) = (critical.id.to_string(), read.id.to_string());
    let app = TestApp::with_records(AppConfig::default(), vec![critical, read]).await;
    (app, critical_id, read_id)
}

fn ids(response: &crate::helpers::TestResponse) -> Vec<String> {
    response.data()["notifications"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|n| n["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_feed_filters_and_counts() {
    let (app, critical_id, read_id) = seeded().await;

    let all = app.request("GET", "/api/notifications", None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(ids(&all), vec![critical_id.clone(), read_id]);
    assert_eq!(all.data()["counts"]["total"], 2);
    assert_eq!(all.data()["counts"]["unread"], 1);
    assert_eq!(all.data()["stale"], false);

    let high = app
        .request("GET", "/api/notifications?filter=high_priority", None)
        .await;
    assert_eq!(ids(&high), vec![critical_id.clone()]);
    assert_eq!(high.data()["filter"], "high_priority");

    let first = &high.data()["notifications"][0];
    assert_eq!(first["display"]["icon"], "check-circle");
    assert_eq!(first["display"]["priority_label"], "Critica");
}

#[tokio::test]
async fn test_mark_read_empties_unread_selection() {
    let (app, critical_id, _) = seeded().await;

    let response = app
        .request("PUT", &format!("/api/notifications/{critical_id}/read"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["stato"], "letta");
    assert!(response.data()["letta_at"].is_string());

    let unread = app
        .request("GET", "/api/notifications?filter=unread", None)
        .await;
    assert!(ids(&unread).is_empty());

    let count = app
        .request("GET", "/api/notifications/unread-count", None)
        .await;
    assert_eq!(count.data()["count"], 0);
}

#[tokio::test]
async fn test_mark_read_twice_is_a_no_op() {
    let (app, critical_id, _) = seeded().await;
    let path = format!("/api/notifications/{critical_id}/read");

    let first = app.request("PUT", &path, None).await;
    let second = app.request("PUT", &path, None).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.data()["letta_at"], second.data()["letta_at"]);
    assert_eq!(first.data()["version"], second.data()["version"]);
}

#[tokio::test]
async fn test_stale_version_is_a_conflict() {
    let (app, critical_id, _) = seeded().await;

    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{critical_id}/archive?expected_version=7"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");

    let unchanged = app
        .request("GET", &format!("/api/notifications/{critical_id}"), None)
        .await;
    assert_eq!(unchanged.data()["stato"], "non_letta");
    assert_eq!(unchanged.data()["version"], 1);
}

#[tokio::test]
async fn test_archive_hides_and_delete_removes() {
    let (app, critical_id, read_id) = seeded().await;

    let archived = app
        .request(
            "PUT",
            &format!("/api/notifications/{critical_id}/archive?expected_version=1"),
            None,
        )
        .await;
    assert_eq!(archived.status, StatusCode::OK);
    assert_eq!(archived.data()["stato"], "archiviata");

    let all = app.request("GET", "/api/notifications", None).await;
    assert_eq!(ids(&all), vec![read_id.clone()]);
    assert_eq!(all.data()["counts"]["archived"], 1);

    let deleted = app
        .request("DELETE", &format!("/api/notifications/{read_id}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let after = app.request("GET", "/api/notifications", None).await;
    assert!(ids(&after).is_empty());

    let gone = app
        .request("GET", &format!("/api/notifications/{read_id}"), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_all_read_reports_count() {
    let records = (0..4)
        .map(|i| {
            notification(
                &i.to_string(),
                Priority::Media,
                NotificationState::NonLetta,
                i,
            )
        })
        .collect();
    let app = TestApp::with_records(AppConfig::default(), records).await;

    let response = app.request("PUT", "/api/notifications/read-all", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["marked"], 4);

    let again = app.request("PUT", "/api/notifications/read-all", None).await;
    assert_eq!(again.data()["marked"], 0);
}

#[tokio::test]
async fn test_publish_validates_and_creates() {
    let app = TestApp::new().await;

    let invalid = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "tipo": "alert",
                "entita_tipo": "ordine",
                "entita_id": "ORD-77",
                "titolo": ""
            })),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let created = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "tipo": "alert",
                "entita_tipo": "ordine",
                "entita_id": "ORD-77",
                "titolo": "Ordine in ritardo",
                "priorita": "alta"
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["stato"], "non_letta");
    assert_eq!(created.data()["version"], 1);
    assert_eq!(created.data()["display"]["kind_label"], "Avviso");

    let feed = app.request("GET", "/api/notifications", None).await;
    assert_eq!(feed.data()["counts"]["high_priority"], 1);
}

#[tokio::test]
async fn test_outage_serves_stale_feed_and_rejects_mutations() {
    let (app, critical_id, _) = seeded().await;

    let fresh = app.request("GET", "/api/notifications", None).await;
    assert_eq!(fresh.data()["stale"], false);

    app.store.set_available(false);
    app.state.feed.invalidate();

    let stale = app.request("GET", "/api/notifications", None).await;
    assert_eq!(stale.status, StatusCode::OK);
    assert_eq!(stale.data()["stale"], true);
    assert_eq!(ids(&stale), ids(&fresh));

    let failed = app
        .request("PUT", &format!("/api/notifications/{critical_id}/read"), None)
        .await;
    assert_eq!(failed.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(failed.body["error"], "MUTATION_FAILED");

    app.store.set_available(true);
    let still_unread = app
        .request("GET", &format!("/api/notifications/{critical_id}"), None)
        .await;
    assert_eq!(still_unread.data()["stato"], "non_letta");
}

#[tokio::test]
async fn test_cold_outage_is_a_fetch_error() {
    let app = TestApp::new().await;
    app.store.set_available(false);

    let response = app.request("GET", "/api/notifications", None).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "FETCH_FAILED");

    let health = app.request("GET", "/api/health/detailed", None).await;
    assert_eq!(health.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health.data()["store"], "unavailable");
}
