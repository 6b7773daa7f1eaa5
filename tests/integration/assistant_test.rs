//! Integration tests for the AI assistant function against a mock gateway.

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use edilhub_core::config::AppConfig;
use edilhub_service::assistant::{GENERIC_ERROR_MESSAGE, QUOTA_EXCEEDED_MESSAGE, RATE_LIMIT_MESSAGE};

use crate::helpers::TestApp;

const API_KEY: &str = "gateway-test-key";

/// Start a gateway that answers every completion with `status` and `body`.
///
/// Requests without the expected bearer token get a 401.
async fn spawn_gateway(status: StatusCode, body: Value) -> String {
    let handler = move |headers: HeaderMap| {
        let body = body.clone();
        async move {
            let authorized = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == format!("Bearer {API_KEY}"));
            if authorized {
                (status, Json(body))
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})))
            }
        }
    };

    let router = Router::new().route("/v1/chat/completions", post(handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock gateway");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{addr}/v1/chat/completions")
}

async fn app_for(endpoint: String) -> TestApp {
    let mut config = AppConfig::default();
    config.assistant.endpoint = endpoint;
    config.assistant.api_key = API_KEY.to_string();
    TestApp::with_records(config, Vec::new()).await
}

fn find_code() -> Value {
    json!({
        "action": "find_code",
        "data": "posa cavo elettrico 3x2.5mm"
    })
}

#[tokio::test]
async fn test_find_code_returns_suggestions() {
    let content = "Ecco i codici:\n```json\n{\"suggestions\":[{\"code\":\"IE.01.015\",\"description\":\"Cavo FG16OR16 3x2.5mmq\",\"unit\":\"m\"}]}\n```";
    let endpoint = spawn_gateway(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]}),
    )
    .await;
    let app = app_for(endpoint).await;

    let response = app
        .request("POST", "/functions/v1/ai-assistant", Some(find_code()))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["result"]["suggestions"][0]["code"],
        "IE.01.015"
    );
}

#[tokio::test]
async fn test_unparseable_reply_is_returned_as_text() {
    let endpoint = spawn_gateway(
        StatusCode::OK,
        json!({"choices": [{"message": {"content": "Nessun codice trovato."}}]}),
    )
    .await;
    let app = app_for(endpoint).await;

    let response = app
        .request(
            "POST",
            "/functions/v1/ai-assistant",
            Some(json!({"action": "chiedi", "data": "ciao"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"], "Nessun codice trovato.");
}

#[tokio::test]
async fn test_rate_limit_is_forwarded() {
    let endpoint = spawn_gateway(StatusCode::TOO_MANY_REQUESTS, json!({})).await;
    let app = app_for(endpoint).await;

    let response = app
        .request("POST", "/functions/v1/ai-assistant", Some(find_code()))
        .await;

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body, json!({"error": RATE_LIMIT_MESSAGE}));
}

#[tokio::test]
async fn test_quota_exhaustion_is_forwarded() {
    let endpoint = spawn_gateway(StatusCode::PAYMENT_REQUIRED, json!({})).await;
    let app = app_for(endpoint).await;

    let response = app
        .request("POST", "/functions/v1/ai-assistant", Some(find_code()))
        .await;

    assert_eq!(response.status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(response.body, json!({"error": QUOTA_EXCEEDED_MESSAGE}));
}

#[tokio::test]
async fn test_other_upstream_failures_are_generic() {
    let endpoint = spawn_gateway(StatusCode::BAD_GATEWAY, json!({"error": "boom"})).await;
    let app = app_for(endpoint).await;

    let response = app
        .request("POST", "/functions/v1/ai-assistant", Some(find_code()))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"error": GENERIC_ERROR_MESSAGE}));
}

#[tokio::test]
async fn test_missing_api_key_is_generic_failure() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/functions/v1/ai-assistant", Some(find_code()))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_malformed_body_is_generic_failure() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/functions/v1/ai-assistant",
            Some(json!("non un oggetto")),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_plain_options_request_succeeds() {
    let app = TestApp::new().await;

    let response = app
        .request("OPTIONS", "/functions/v1/ai-assistant", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
}
