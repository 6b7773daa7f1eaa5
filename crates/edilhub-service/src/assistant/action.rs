//! Assistant actions and the request envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task requested from the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantAction {
    /// Map the columns of an uploaded spreadsheet to bill-of-quantities fields.
    AnalyzeExcel,
    /// Suggest price-list codes for a work description.
    FindCode,
    /// Group line items into work categories.
    GroupItems,
    /// Suggest line items missing from an estimate.
    SuggestItems,
    /// Any other action name; answered with the generic prompt.
    Generic(String),
}

impl AssistantAction {
    /// Parse an action name. Unknown names map to [`Generic`](Self::Generic).
    pub fn parse(action: &str) -> Self {
        match action {
            "analyze_excel" => Self::AnalyzeExcel,
            "find_code" => Self::FindCode,
            "group_items" => Self::GroupItems,
            "suggest_items" => Self::SuggestItems,
            other => Self::Generic(other.to_string()),
        }
    }

    /// Return the action name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::AnalyzeExcel => "analyze_excel",
            Self::FindCode => "find_code",
            Self::GroupItems => "group_items",
            Self::SuggestItems => "suggest_items",
            Self::Generic(name) => name,
        }
    }
}

impl fmt::Display for AssistantAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body accepted by the assistant endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantRequest {
    /// Action name.
    #[serde(default)]
    pub action: String,
    /// Action input: free text or structured JSON.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Raw spreadsheet content for `analyze_excel`.
    #[serde(default, rename = "fileContent")]
    pub file_content: Option<String>,
}

impl AssistantRequest {
    /// The parsed action.
    pub fn action(&self) -> AssistantAction {
        AssistantAction::parse(&self.action)
    }
}
