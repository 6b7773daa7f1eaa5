//! AI assistant proxy: prompt templates, upstream call, result extraction.

pub mod action;
pub mod extract;
pub mod prompts;
pub mod service;

pub use action::{AssistantAction, AssistantRequest};
pub use extract::extract_result;
pub use service::{
    AssistantService, GENERIC_ERROR_MESSAGE, QUOTA_EXCEEDED_MESSAGE, RATE_LIMIT_MESSAGE,
};
