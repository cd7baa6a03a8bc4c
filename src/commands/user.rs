//! Account commands.

use clap::{Args, Subcommand};

use murmur_core::error::AppError;
use murmur_service::{LoginForm, RegistrationForm, ServiceHub};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new account (password is prompted)
    Register {
        /// Username
        username: String,
        /// Email address
        email: String,
    },
    /// Show a user's public identity
    Show {
        /// Username
        username: String,
    },
    /// Check a username and password (password is prompted)
    Login {
        /// Username
        username: String,
    },
    /// Check whether a username or email is still free
    Available {
        /// Username, or an email address if it contains '@'
        value: String,
    },
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    services: &ServiceHub,
    format: OutputFormat,
) -> Result<(), AppError> {
    let identity = &services.identity;

    match &args.command {
        UserCommand::Register { username, email } => {
            let password = super::prompt_password(true)?;
            let user = identity
                .register(RegistrationForm::new(username.as_str(), email.as_str(), password))
                .await?;
            output::print_success(&format!("User '{}' registered", user.username));
            output::print_item(&user, format);
        }
        UserCommand::Show { username } => {
            let user = super::resolve_user(services, username).await?;
            output::print_item(&user, format);
        }
        UserCommand::Login { username } => {
            let password = super::prompt_password(false)?;
            let user = identity
                .authenticate(LoginForm::new(username.as_str(), password))
                .await?;
            output::print_success(&format!("Credentials valid for '{}'", user.username));
        }
        UserCommand::Available { value } => {
            let taken = if value.contains('@') {
                identity.email_exists(value).await?
            } else {
                identity.username_exists(value).await?
            };
            output::print_kv(value, if taken { "taken" } else { "available" });
        }
    }

    Ok(())
}
