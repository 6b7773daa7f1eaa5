//! `feed` command.

use clap::Args;

use edilhub_core::error::AppError;
use edilhub_service::notification::{FeedCounts, FeedFilter, filter};

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for the feed command
#[derive(Debug, Args)]
pub struct FeedArgs {
    /// Selection: all, unread, or high_priority
    #[arg(long, default_value = "all")]
    pub filter: String,

    /// Number of most recent notifications to consider
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Execute the feed command
pub async fn execute(args: &FeedArgs, ctx: &Context) -> Result<(), AppError> {
    let selection: FeedFilter = args.filter.parse()?;
    let limit = ctx.feed.resolve_limit(args.limit);
    let view = ctx.feed.feed(limit).await?;

    let selected = filter(&view.notifications, selection);
    output::print_notifications(&selected, ctx.format);

    if ctx.format == OutputFormat::Table {
        let counts = FeedCounts::of(&view.notifications);
        println!();
        output::print_kv("Totale", &counts.total.to_string());
        output::print_kv("Non lette", &counts.unread.to_string());
        output::print_kv("Priorità alta", &counts.high_priority.to_string());
    }

    Ok(())
}
