//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output;
use vidhub_core::error::AppError;
use vidhub_database::connection::mask_password;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets hidden
    Show,
    /// Load and validate the configuration
    Validate,
}

fn secret_state(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<set>" }
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;

    match &args.command {
        ConfigCommand::Show => {
            println!("Environment: {env}");
            output::print_kv("server", &format!("{}:{}", config.server.host, config.server.port));
            output::print_kv("body limit (MB)", &config.server.body_limit_mb.to_string());
            output::print_kv("cors origins", &config.server.cors.allowed_origins.join(", "));
            output::print_kv("database provider", &config.database.provider);
            output::print_kv("database url", &mask_password(&config.database.url));
            output::print_kv("access secret", secret_state(&config.auth.access_token_secret));
            output::print_kv("access ttl (min)", &config.auth.access_token_ttl_minutes.to_string());
            output::print_kv("refresh secret", secret_state(&config.auth.refresh_token_secret));
            output::print_kv("refresh ttl (h)", &config.auth.refresh_token_ttl_hours.to_string());
            output::print_kv("secure cookies", &config.auth.cookie_secure.to_string());
            output::print_kv("media provider", &config.media.provider);
            output::print_kv("log", &format!("{} ({})", config.logging.level, config.logging.format));
        }
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => output::print_success(&format!("Configuration for '{env}' is valid")),
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e.message));
                return Err(e);
            }
        },
    }

    Ok(())
}
