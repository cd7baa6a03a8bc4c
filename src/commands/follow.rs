//! Follow graph commands.

use clap::{Args, Subcommand};

use murmur_core::error::AppError;
use murmur_service::ServiceHub;

use crate::output::{self, OutputFormat, UserRow};

/// Arguments for follow commands
#[derive(Debug, Args)]
pub struct FollowArgs {
    /// Follow subcommand
    #[command(subcommand)]
    pub command: FollowCommand,
}

/// Follow subcommands
#[derive(Debug, Subcommand)]
pub enum FollowCommand {
    /// Make one user follow another
    Add {
        /// Follower username
        follower: String,
        /// Username to follow
        followed: String,
    },
    /// Stop following
    Remove {
        /// Follower username
        follower: String,
        /// Username to stop following
        followed: String,
    },
    /// List everyone following a user
    Followers {
        /// Username
        username: String,
    },
    /// List everyone a user follows
    Following {
        /// Username
        username: String,
    },
}

/// Execute follow commands
pub async fn execute(
    args: &FollowArgs,
    services: &ServiceHub,
    format: OutputFormat,
) -> Result<(), AppError> {
    let graph = &services.graph;

    match &args.command {
        FollowCommand::Add { follower, followed } => {
            let follower = super::resolve_user(services, follower).await?;
            graph.follow(followed, follower.id).await?;
            output::print_success(&format!("'{}' now follows '{followed}'", follower.username));
        }
        FollowCommand::Remove { follower, followed } => {
            let follower = super::resolve_user(services, follower).await?;
            graph.unfollow(followed, follower.id).await?;
            output::print_success(&format!(
                "'{}' no longer follows '{followed}'",
                follower.username
            ));
        }
        FollowCommand::Followers { username } => {
            let user = super::resolve_user(services, username).await?;
            let rows: Vec<UserRow> = graph
                .followers(user.id)
                .await?
                .into_iter()
                .map(UserRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        FollowCommand::Following { username } => {
            let user = super::resolve_user(services, username).await?;
            let rows: Vec<UserRow> = graph
                .following(user.id)
                .await?
                .into_iter()
                .map(UserRow::from)
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
