//! AI assistant proxy configuration.

use serde::{Deserialize, Serialize};

/// Hosted chat-completion endpoint used by the AI assistant proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Full URL of the chat-completion endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer key for the endpoint. Empty disables the proxy.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier forwarded with every request.
    #[serde(default = "default_model")]
    pub model: String,
}

impl AssistantConfig {
    /// Whether an API key has been configured.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
        }
    }
}

fn default_endpoint() -> String {
    "https://ai.gateway.lovable.dev/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "google/gemini-2.5-flash".to_string()
}
