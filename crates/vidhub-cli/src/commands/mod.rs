//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use vidhub_core::config::AppConfig;
use vidhub_core::error::AppError;
use vidhub_database::DatabasePool;

/// VidHub: video platform backend administration
#[derive(Debug, Parser)]
#[command(name = "vidhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (config/{env}.toml)
    #[arg(short, long, env = "VIDHUB_ENV", default_value = "development")]
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
    /// Start the VidHub server
    Serve,
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve => serve::execute(&self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::User(args) => user::execute(args, &self.env, self.format).await,
            Commands::Config(args) => config::execute(args, &self.env).await,
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: connect to PostgreSQL. Admin commands need a persistent store.
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if !config.database.is_postgres() {
        return Err(AppError::configuration(
            "database.provider must be 'postgres' for admin commands",
        ));
    }
    DatabasePool::connect(&config.database).await
}
