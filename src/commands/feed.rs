//! Feed command.

use clap::Args;

use murmur_core::error::AppError;
use murmur_service::ServiceHub;

use crate::output::{self, OutputFormat};

/// Arguments for the feed command
#[derive(Debug, Args)]
pub struct FeedArgs {
    /// Whose feed to show
    pub username: String,
}

/// Print the feed of `username`
pub async fn execute(
    args: &FeedArgs,
    services: &ServiceHub,
    format: OutputFormat,
) -> Result<(), AppError> {
    let viewer = super::resolve_user(services, &args.username).await?;
    let posts = services.content.feed(viewer.id).await?;
    output::print_posts(&posts, format);
    Ok(())
}
