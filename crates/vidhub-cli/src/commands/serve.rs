//! Start the HTTP server.

use vidhub_core::error::AppError;

/// Execute the serve command
pub async fn execute(env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    tracing::info!(env = %env, "Starting VidHub server from CLI");
    vidhub_api::run_server(config).await
}
