//! Upstream chat-completion call.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use edilhub_core::config::assistant::AssistantConfig;
use edilhub_core::error::{AppError, ErrorKind};
use edilhub_core::result::AppResult;

use super::action::AssistantRequest;
use super::extract::extract_result;
use super::prompts::{ChatMessage, build_messages};

/// Message returned when the upstream rate limit is hit.
pub const RATE_LIMIT_MESSAGE: &str = "Limite richieste superato, riprova tra qualche istante.";
/// Message returned when the workspace has no AI credits left.
pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "Crediti AI esauriti, ricarica il workspace per continuare.";
/// Message returned for every other failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Errore durante l'elaborazione della richiesta AI";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: String,
}

/// Forwards assistant requests to a hosted chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct AssistantService {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl AssistantService {
    /// Creates a new assistant service.
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Run `request` and return the extracted result.
    ///
    /// Upstream 429 maps to `RateLimit` and 402 to `QuotaExceeded`, both
    /// carrying the user-facing message. Anything else fails with
    /// `ExternalService` or `Configuration`.
    pub async fn run(&self, request: &AssistantRequest) -> AppResult<serde_json::Value> {
        if !self.config.is_configured() {
            return Err(AppError::configuration("AI assistant API key is not configured"));
        }

        let action = request.action();
        let body = CompletionRequest {
            model: &self.config.model,
            messages: build_messages(&action, &request.data, request.file_content.as_deref()),
        };

        info!(action = %action, model = %self.config.model, "Forwarding AI assistant request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "AI gateway unreachable", e)
            })?;

        let status = response.status();
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(action = %action, "AI gateway rate limit exceeded");
                return Err(AppError::rate_limited(RATE_LIMIT_MESSAGE));
            }
            StatusCode::PAYMENT_REQUIRED => {
                warn!(action = %action, "AI gateway credits exhausted");
                return Err(AppError::quota_exceeded(QUOTA_EXCEEDED_MESSAGE));
            }
            s if !s.is_success() => {
                let text = response.text().await.unwrap_or_default();
                warn!(action = %action, status = %s, body = %text, "AI gateway error");
                return Err(AppError::external(format!("AI gateway returned {s}")));
            }
            _ => {}
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Failed to parse AI gateway response",
                e,
            )
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::external("AI gateway returned no choices"))?;

        Ok(extract_result(&content))
    }
}
