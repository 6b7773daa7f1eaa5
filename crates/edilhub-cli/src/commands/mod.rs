//! CLI command definitions and dispatch.

pub mod assist;
pub mod feed;
pub mod notification;
pub mod watch;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use edilhub_core::config::AppConfig;
use edilhub_core::error::AppError;
use edilhub_service::notification::{FeedController, NotificationService};

use crate::output::OutputFormat;
use crate::remote::HttpNotificationStore;

/// EdilHub: workflow notification center client
#[derive(Debug, Parser)]
#[command(name = "edilhub", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the EdilHub server
    #[arg(short, long, default_value = "http://localhost:8080")]
    pub server: String,

    /// Configuration environment overlay (config/{env}.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the notification feed
    Feed(feed::FeedArgs),
    /// Follow the notification feed as it changes
    Watch(watch::WatchArgs),
    /// Mark a notification as read
    Read(notification::TargetArgs),
    /// Mark every unread notification as read
    ReadAll,
    /// Archive a notification
    Archive(notification::TargetArgs),
    /// Delete a notification permanently
    Delete(notification::TargetArgs),
    /// Run an AI assistant action
    Assist(assist::AssistArgs),
}

/// Remote store and services shared by the notification commands.
pub struct Context {
    /// HTTP-backed store
    pub store: Arc<HttpNotificationStore>,
    /// Feed cache over the remote store
    pub feed: Arc<FeedController>,
    /// State transitions over the remote store
    pub service: NotificationService,
    /// Output format
    pub format: OutputFormat,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.env)?;
        let ctx = self.context(&config);

        match &self.command {
            Commands::Feed(args) => feed::execute(args, &ctx).await,
            Commands::Watch(args) => watch::execute(args, &ctx).await,
            Commands::Read(args) => notification::read(args, &ctx).await,
            Commands::ReadAll => notification::read_all(&ctx).await,
            Commands::Archive(args) => notification::archive(args, &ctx).await,
            Commands::Delete(args) => notification::delete(args, &ctx).await,
            Commands::Assist(args) => assist::execute(args, ctx.store.base_url(), ctx.format).await,
        }
    }

    fn context(&self, config: &AppConfig) -> Context {
        let store = Arc::new(HttpNotificationStore::new(&self.server));
        let feed = Arc::new(FeedController::new(store.clone(), &config.feed));
        let service = NotificationService::new(store.clone(), Arc::clone(&feed));
        Context {
            store,
            feed,
            service,
            format: self.format,
        }
    }
}

/// Helper: load configuration for the given environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env).map_err(|e| AppError::configuration(format!("Failed to load config: {e}")))
}
