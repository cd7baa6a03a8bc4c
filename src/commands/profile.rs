//! Profile command.

use clap::Args;

use murmur_core::error::AppError;
use murmur_service::ServiceHub;

use crate::output::{self, OutputFormat};

/// Arguments for the profile command
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Whose profile to show
    pub username: String,

    /// Show the profile as this user sees it
    #[arg(long)]
    pub viewer: Option<String>,
}

/// Print a profile overview
pub async fn execute(
    args: &ProfileArgs,
    services: &ServiceHub,
    format: OutputFormat,
) -> Result<(), AppError> {
    let viewer = super::resolve_viewer(services, args.viewer.as_deref()).await?;
    let overview = services.profile.overview(&args.username, viewer).await?;
    output::print_item(&overview, format);
    Ok(())
}
