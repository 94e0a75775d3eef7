//! PostgreSQL connection pool management.
//!
//! The URL is only ever logged through [`mask_password`].

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use vidhub_core::config::database::DatabaseConfig;
use vidhub_core::error::{AppError, ErrorKind};

/// Shared PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct DatabasePool(PgPool);

impl DatabasePool {
    /// Opens the pool described by `[database]`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %mask_password(&config.url),
            pool = format!("{}..{}", config.min_connections, config.max_connections),
            "Opening PostgreSQL pool"
        );

        let options = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

        match options.connect(&config.url).await {
            Ok(pool) => {
                info!("PostgreSQL pool ready");
                Ok(Self(pool))
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                format!("Cannot reach PostgreSQL: {e}"),
                e,
            )),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.0
    }

    /// Round-trips `SELECT 1` through the pool.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.0)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database is unreachable", e))
    }

    /// Waits for in-flight queries and closes every connection.
    pub async fn close(&self) {
        self.0.close().await;
        info!("PostgreSQL pool closed");
    }
}

/// Replaces the password in a connection URL with `****`.
pub fn mask_password(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url[..at_pos].rfind(':') {
        Some(colon_pos) if colon_pos > scheme_end => {
            format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
