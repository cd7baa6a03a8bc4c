//! CLI command definitions and dispatch.

pub mod feed;
pub mod follow;
pub mod migrate;
pub mod post;
pub mod profile;
pub mod user;

use clap::{Parser, Subcommand};

use murmur_core::config::AppConfig;
use murmur_core::error::AppError;
use murmur_core::types::UserId;
use murmur_database::DatabasePool;
use murmur_entity::user::PublicUser;
use murmur_service::ServiceHub;

use crate::output::OutputFormat;

/// Murmur: users, posts, follows, and feeds
#[derive(Debug, Parser)]
#[command(name = "murmur", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}.toml`
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
    /// Apply pending database migrations
    Migrate,
    /// Accounts and credentials
    User(user::UserArgs),
    /// Authoring and reading posts
    Post(post::PostArgs),
    /// The follow graph
    Follow(follow::FollowArgs),
    /// Posts from everyone a user follows
    Feed(feed::FeedArgs),
    /// A user's profile summary
    Profile(profile::ProfileArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let pool = DatabasePool::connect(&config.database).await?;

        let services = build_services(config, &pool)?;

        let result = match &self.command {
            Commands::Migrate => migrate::execute(&pool).await,
            Commands::User(args) => user::execute(args, &services, self.format).await,
            Commands::Post(args) => post::execute(args, &services, self.format).await,
            Commands::Follow(args) => follow::execute(args, &services, self.format).await,
            Commands::Feed(args) => feed::execute(args, &services, self.format).await,
            Commands::Profile(args) => profile::execute(args, &services, self.format).await,
        };

        pool.close().await;
        result
    }
}

/// Wire the services over the PostgreSQL stores.
fn build_services(config: &AppConfig, pool: &DatabasePool) -> Result<ServiceHub, AppError> {
    let stores = pool.stores();
    ServiceHub::new(
        &config.auth,
        &config.avatar,
        stores.users,
        stores.posts,
        stores.follows,
    )
}

/// Resolve a username given on the command line.
pub async fn resolve_user(services: &ServiceHub, username: &str) -> Result<PublicUser, AppError> {
    services.identity.find_public_by_username(username).await
}

/// Resolve an optional `--viewer` username.
pub async fn resolve_viewer(
    services: &ServiceHub,
    viewer: Option<&str>,
) -> Result<Option<UserId>, AppError> {
    match viewer {
        Some(username) => Ok(Some(resolve_user(services, username).await?.id)),
        None => Ok(None),
    }
}

/// Read a password from the terminal without echo.
pub fn prompt_password(confirm: bool) -> Result<String, AppError> {
    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
