//! Post commands.

use clap::{Args, Subcommand};

use murmur_core::error::AppError;
use murmur_service::{PostForm, SearchQuery, ServiceHub, UpdateOutcome};

use crate::output::{self, OutputFormat};

/// Arguments for post commands
#[derive(Debug, Args)]
pub struct PostArgs {
    /// Post subcommand
    #[command(subcommand)]
    pub command: PostCommand,
}

/// Post subcommands
#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// Publish a post
    Create {
        /// Author username
        #[arg(long)]
        author: String,
        /// Title
        #[arg(long)]
        title: String,
        /// Body
        #[arg(long)]
        body: String,
    },
    /// Show one post
    Show {
        /// Post ID
        id: String,
        /// Show the post as this user sees it
        #[arg(long)]
        viewer: Option<String>,
    },
    /// Replace a post's title and body
    Edit {
        /// Post ID
        id: String,
        /// Author username
        #[arg(long)]
        author: String,
        /// New title
        #[arg(long)]
        title: String,
        /// New body
        #[arg(long)]
        body: String,
    },
    /// Delete a post
    Delete {
        /// Post ID
        id: String,
        /// Author username
        #[arg(long)]
        author: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// List a user's posts, newest first
    List {
        /// Author username
        username: String,
    },
    /// Full-text search
    Search {
        /// Search term
        term: String,
    },
}

/// Execute post commands
pub async fn execute(
    args: &PostArgs,
    services: &ServiceHub,
    format: OutputFormat,
) -> Result<(), AppError> {
    let content = &services.content;

    match &args.command {
        PostCommand::Create {
            author,
            title,
            body,
        } => {
            let author = super::resolve_user(services, author).await?;
            let id = content
                .create(PostForm::new(title.as_str(), body.as_str()), author.id)
                .await?;
            output::print_success(&format!("Post {id} created"));
        }
        PostCommand::Show { id, viewer } => {
            let viewer = super::resolve_viewer(services, viewer.as_deref()).await?;
            let post = content.find_by_id(id, viewer).await?;
            output::print_item(&post, format);
        }
        PostCommand::Edit {
            id,
            author,
            title,
            body,
        } => {
            let author = super::resolve_user(services, author).await?;
            let outcome = content
                .update(id, PostForm::new(title.as_str(), body.as_str()), author.id)
                .await?;
            match outcome {
                UpdateOutcome::Updated => output::print_success(&format!("Post {id} updated")),
                UpdateOutcome::ValidationFailed(problems) => {
                    return Err(AppError::validation(problems));
                }
                UpdateOutcome::Forbidden => {
                    return Err(AppError::forbidden(format!(
                        "'{}' is not the author of post {id}",
                        author.username
                    )));
                }
            }
        }
        PostCommand::Delete { id, author, force } => {
            let author = super::resolve_user(services, author).await?;
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete post {id}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            content.delete(id, author.id).await?;
            output::print_success(&format!("Post {id} deleted"));
        }
        PostCommand::List { username } => {
            let author = super::resolve_user(services, username).await?;
            let posts = content.find_by_author(author.id, Some(author.id)).await?;
            output::print_posts(&posts, format);
        }
        PostCommand::Search { term } => {
            let posts = content.search(&SearchQuery::new(term.as_str()), None).await?;
            output::print_posts(&posts, format);
        }
    }

    Ok(())
}
