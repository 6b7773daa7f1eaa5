//! Integration tests for the UI preference endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_defaults() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/preferences", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["theme"]["mode"], "system");
    assert_eq!(response.data()["theme"]["accent"], "orange");
    assert_eq!(response.data()["sidebar"]["visible"], true);
    assert_eq!(response.data()["favorites"], json!([]));
}

#[tokio::test]
async fn test_theme_and_sidebar_updates() {
    let app = TestApp::new().await;

    let theme = app
        .request(
            "PUT",
            "/api/preferences/theme",
            Some(json!({"mode": "dark", "density": "compact"})),
        )
        .await;
    assert_eq!(theme.status, StatusCode::OK);
    assert_eq!(theme.data()["theme"]["mode"], "dark");
    assert_eq!(theme.data()["theme"]["accent"], "orange");

    let toggled = app
        .request("POST", "/api/preferences/sidebar/toggle", None)
        .await;
    assert_eq!(toggled.data()["value"], false);

    let sidebar = app
        .request(
            "PUT",
            "/api/preferences/sidebar",
            Some(json!({"visible": true, "toggle_section": "contabilita"})),
        )
        .await;
    assert_eq!(sidebar.data()["sidebar"]["visible"], true);
    assert_eq!(
        sidebar.data()["sidebar"]["collapsed_sections"],
        json!(["contabilita"])
    );
}

#[tokio::test]
async fn test_favorites_are_unique() {
    let app = TestApp::new().await;
    let favorite = json!({"path": "/preventivi", "label": "Preventivi"});

    let first = app
        .request("POST", "/api/preferences/favorites", Some(favorite.clone()))
        .await;
    assert_eq!(first.data()["value"], true);

    let second = app
        .request("POST", "/api/preferences/favorites", Some(favorite))
        .await;
    assert_eq!(second.data()["value"], false);

    let prefs = app.request("GET", "/api/preferences", None).await;
    assert_eq!(prefs.data()["favorites"].as_array().map(Vec::len), Some(1));

    let removed = app
        .request("DELETE", "/api/preferences/favorites?path=/preventivi", None)
        .await;
    assert_eq!(removed.data()["value"], true);

    let missing = app
        .request("DELETE", "/api/preferences/favorites?path=/preventivi", None)
        .await;
    assert_eq!(missing.data()["value"], false);
}

#[tokio::test]
async fn test_profile_is_validated_and_clearable() {
    let app = TestApp::new().await;

    let invalid = app
        .request(
            "PUT",
            "/api/preferences/profile",
            Some(json!({"display_name": "Giulia Bianchi", "email": "giulia"})),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let saved = app
        .request(
            "PUT",
            "/api/preferences/profile",
            Some(json!({
                "display_name": "Giulia Bianchi",
                "role": "Responsabile commesse",
                "email": "giulia@example.com"
            })),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.data()["profile"]["display_name"], "Giulia Bianchi");

    let cleared = app
        .request("DELETE", "/api/preferences/profile", None)
        .await;
    assert!(cleared.data()["profile"].is_null());
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let app = TestApp::new().await;
    app.request(
        "PUT",
        "/api/preferences/theme",
        Some(json!({"mode": "light", "accent": "blue"})),
    )
    .await;

    let reset = app.request("DELETE", "/api/preferences", None).await;
    assert_eq!(reset.status, StatusCode::OK);
    assert_eq!(reset.data()["theme"]["mode"], "system");
    assert_eq!(reset.data()["theme"]["accent"], "orange");
}
