//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use vidhub_auth::SessionTokenManager;
use vidhub_core::error::AppError;
use vidhub_core::types::pagination::PageRequest;
use vidhub_database::{UserRepository, UserStore};
use vidhub_entity::user::{CreateUser, User};
use vidhub_service::check_new_account;

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
    /// List users
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u64,
        /// Users per page
        #[arg(long, default_value_t = 25)]
        per_page: u64,
    },
    /// Create a user with an already hosted avatar
    Create {
        /// Username
        #[arg(long)]
        username: String,
        /// Email
        #[arg(long)]
        email: String,
        /// Full name
        #[arg(long)]
        full_name: String,
        /// Avatar URL
        #[arg(long)]
        avatar: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Revoke a user's refresh token, ending every session
    Revoke {
        /// Username or email
        identifier: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Full name
    full_name: String,
    /// Has a live refresh token
    signed_in: bool,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone(),
            full_name: u.full_name.clone(),
            signed_in: u.refresh_token.is_some(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.pool().clone()));
    let sessions = SessionTokenManager::new(&config.auth, Arc::clone(&users));

    match &args.command {
        UserCommand::List { page, per_page } => {
            let page = users.list(&PageRequest::new(*page, *per_page)).await?;
            let rows: Vec<UserRow> = page.items.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {} of {} ({} users)",
                    page.page, page.total_pages, page.total_items
                );
            }
        }
        UserCommand::Create {
            username,
            email,
            full_name,
            avatar,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };
            let account =
                check_new_account(users.as_ref(), full_name, email, username, &password).await?;
            let avatar = avatar.trim();
            if avatar.is_empty() {
                return Err(AppError::validation("Avatar is required"));
            }
            let password_hash = sessions.hash_new_password(&password)?;

            let user = users
                .create(CreateUser {
                    username: account.username,
                    email: account.email,
                    full_name: account.full_name,
                    avatar: avatar.to_string(),
                    cover_image: None,
                    password_hash,
                })
                .await?;
            output::print_success(&format!("User '{}' created", user.username));
            output::print_kv("ID", &user.id.to_string());
        }
        UserCommand::Revoke { identifier, force } => {
            let user = users
                .find_by_identifier(identifier)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{identifier}' not found")))?;

            if user.refresh_token.is_none() {
                output::print_warning(&format!("User '{}' has no live session", user.username));
                pool.close().await;
                return Ok(());
            }

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Sign '{}' out everywhere?", user.username))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
                if !confirm {
                    println!("Cancelled.");
                    pool.close().await;
                    return Ok(());
                }
            }

            sessions.revoke(user.id).await?;
            output::print_success(&format!("Refresh token revoked for '{}'", user.username));
        }
    }

    pool.close().await;
    Ok(())
}
