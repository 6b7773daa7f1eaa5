//! `assist` command: calls the AI assistant function.

use std::path::PathBuf;

use clap::Args;
use serde::Deserialize;
use serde_json::{Value, json};

use edilhub_core::error::{AppError, ErrorKind};

use crate::output::{self, OutputFormat};

/// Arguments for the assist command
#[derive(Debug, Args)]
pub struct AssistArgs {
    /// Action: analyze_excel, find_code, group_items, suggest_items, or free text
    pub action: String,

    /// Action input as JSON; plain text is sent as a JSON string
    #[arg(short, long, default_value = "{}")]
    pub data: String,

    /// File whose text is attached as `fileContent`
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Reply {
    Success { result: Value },
    Failure { error: String },
}

/// Execute the assist command
pub async fn execute(args: &AssistArgs, server: &str, format: OutputFormat) -> Result<(), AppError> {
    let data: Value =
        serde_json::from_str(&args.data).unwrap_or_else(|_| Value::String(args.data.clone()));
    let file_content = match &args.file {
        Some(path) => Some(tokio::fs::read_to_string(path).await?),
        None => None,
    };

    let body = json!({
        "action": args.action,
        "data": data,
        "fileContent": file_content,
    });

    let response = reqwest::Client::new()
        .post(format!("{server}/functions/v1/ai-assistant"))
        .json(&body)
        .send()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::ExternalService, "Server unreachable", e))?;

    let status = response.status();
    let reply: Reply = response.json().await.map_err(|e| {
        AppError::with_source(ErrorKind::ExternalService, "Malformed assistant reply", e)
    })?;

    match reply {
        Reply::Success { result } => {
            match format {
                OutputFormat::Json => output::print_json(&result),
                OutputFormat::Table => match &result {
                    Value::String(text) => println!("{text}"),
                    other => output::print_json(other),
                },
            }
            Ok(())
        }
        Reply::Failure { error } => Err(match status.as_u16() {
            429 => AppError::rate_limited(error),
            402 => AppError::quota_exceeded(error),
            _ => AppError::external(error),
        }),
    }
}
