//! Notification state transition commands.

use clap::Args;
use uuid::Uuid;

use edilhub_core::error::AppError;

use super::Context;
use crate::output::{self, OutputFormat};

/// Target of a single-record transition
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Notification ID
    pub id: String,

    /// Reject the change if the record's version differs
    #[arg(long)]
    pub expected_version: Option<i64>,
}

impl TargetArgs {
    fn uuid(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.id)
            .map_err(|e| AppError::validation(format!("Invalid notification ID: {e}")))
    }
}

/// Mark one notification as read
pub async fn read(args: &TargetArgs, ctx: &Context) -> Result<(), AppError> {
    let n = ctx
        .service
        .mark_as_read(args.uuid()?, args.expected_version)
        .await?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&n),
        OutputFormat::Table => output::print_success(&format!(
            "'{}' marked as read (version {})",
            n.titolo, n.version
        )),
    }
    Ok(())
}

/// Mark every unread notification as read
pub async fn read_all(ctx: &Context) -> Result<(), AppError> {
    let marked = ctx.service.mark_all_as_read().await?;
    if marked == 0 {
        output::print_warning("No unread notifications");
    } else {
        output::print_success(&format!("Marked {marked} notifications as read"));
    }
    Ok(())
}

/// Archive one notification
pub async fn archive(args: &TargetArgs, ctx: &Context) -> Result<(), AppError> {
    let n = ctx
        .service
        .archive(args.uuid()?, args.expected_version)
        .await?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&n),
        OutputFormat::Table => output::print_success(&format!("'{}' archived", n.titolo)),
    }
    Ok(())
}

/// Delete one notification
pub async fn delete(args: &TargetArgs, ctx: &Context) -> Result<(), AppError> {
    ctx.service
        .delete(args.uuid()?, args.expected_version)
        .await?;
    output::print_success(&format!("Notification {} deleted", args.id));
    Ok(())
}
