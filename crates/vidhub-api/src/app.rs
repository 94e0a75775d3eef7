//! Application builder: wires stores, media host, and services into an
//! Axum app and runs it.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::oneshot;
use tracing::{info, warn};

use vidhub_auth::SessionTokenManager;
use vidhub_core::config::AppConfig;
use vidhub_core::error::{AppError, ErrorKind};
use vidhub_database::{DatabasePool, MemoryStore, Stores};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the VidHub server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    config.validate()?;
    let config = Arc::new(config);

    // ── Step 1: Stores ───────────────────────────────────────────
    let (stores, pool) = if config.database.is_postgres() {
        let pool = DatabasePool::connect(&config.database).await?;
        if config.database.run_migrations {
            vidhub_database::migration::run_migrations(pool.pool()).await?;
        }
        (Stores::postgres(&pool), Some(pool))
    } else {
        warn!("Using the in-memory store; data is lost on restart");
        (Stores::memory(Arc::new(MemoryStore::new())), None)
    };

    // ── Step 2: Media host ───────────────────────────────────────
    let media = vidhub_storage::create_media_host(&config.media).await?;

    // ── Step 3: Auth + services ──────────────────────────────────
    let session_manager = SessionTokenManager::new(&config.auth, Arc::clone(&stores.users));
    let state = AppState::new(Arc::clone(&config), stores, media, session_manager);

    // ── Step 4: HTTP server ──────────────────────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;
    info!(addr = %addr, "VidHub server listening");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    let finished = tokio::select! {
        joined = &mut server => Some(flatten(joined)),
        () = shutdown_signal() => None,
    };

    let result = match finished {
        Some(result) => result,
        None => {
            info!("Shutdown signal received, draining connections");
            let _ = shutdown_tx.send(());
            let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
            match tokio::time::timeout(grace, &mut server).await {
                Ok(joined) => flatten(joined),
                Err(_) => {
                    warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out");
                    server.abort();
                    Ok(())
                }
            }
        }
    };

    if let Some(pool) = pool {
        pool.close().await;
    }
    info!("VidHub server stopped");
    result
}

fn flatten(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::from(e)),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
