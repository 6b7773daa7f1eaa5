//! `watch` command.

use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use edilhub_core::error::AppError;
use edilhub_service::notification::{FeedCounts, FeedFilter, filter};
use edilhub_worker::FeedPoller;

use super::Context;
use crate::output;

/// Arguments for the watch command
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Selection: all, unread, or high_priority
    #[arg(long, default_value = "unread")]
    pub filter: String,

    /// Refresh interval in seconds (defaults to the configured poll interval)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Number of most recent notifications to consider
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Execute the watch command until Ctrl+C
pub async fn execute(args: &WatchArgs, ctx: &Context) -> Result<(), AppError> {
    let selection: FeedFilter = args.filter.parse()?;
    let mut subscription = poller(args, ctx).subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            next = subscription.changed() => {
                let view = match next {
                    Ok(view) => view,
                    Err(e) => {
                        output::print_error(&e.to_string());
                        break;
                    }
                };
                let counts = FeedCounts::of(&view.notifications);
                println!(
                    "── {} ── {} non lette, {} priorità alta{}",
                    view.fetched_at.format("%H:%M:%S"),
                    counts.unread,
                    counts.high_priority,
                    if view.stale { " (dati non aggiornati)" } else { "" },
                );
                output::print_notifications(&filter(&view.notifications, selection), ctx.format);
            }
        }
    }

    subscription.release().await;
    Ok(())
}

fn poller(args: &WatchArgs, ctx: &Context) -> FeedPoller {
    if args.interval.is_none() && args.limit.is_none() {
        return FeedPoller::with_defaults(Arc::clone(&ctx.feed));
    }
    let interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| ctx.feed.poll_interval());
    let limit = ctx.feed.resolve_limit(args.limit);
    FeedPoller::new(Arc::clone(&ctx.feed), interval, limit)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::commands::{Cli, Commands};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("edilhub").chain(args.iter().copied()))
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(parse(&["watch", "--interval", "0"]).is_err());
    }

    #[test]
    fn test_interval_and_limit_parsed() {
        let cli = parse(&["watch", "-i", "5", "-l", "20"]).unwrap();
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch command");
        };
        assert_eq!(args.interval, Some(5));
        assert_eq!(args.limit, Some(20));
        assert_eq!(args.filter, "unread");
    }

    #[test]
    fn test_defaults_leave_interval_unset() {
        let cli = parse(&["watch"]).unwrap();
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch command");
        };
        assert!(args.interval.is_none());
        assert!(args.limit.is_none());
    }
}
