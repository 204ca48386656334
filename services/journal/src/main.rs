use anyhow::Result;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod error;
mod middleware;
mod models;
mod password;
mod repositories;
mod routes;
mod state;

use common::database::{health_check, init_pool, run_migrations};
use sqlx::migrate::Migrator;

use crate::{
    config::Config,
    repositories::{JournalRepository, UserRepository},
    state::AppState,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal=info,tower_http=info".into()),
        )
        .init();

    info!("Starting journal service");

    let config = Config::from_env()?;

    // Initialize database connection pool
    let pool = init_pool(&config.database).await?;

    // Check database connectivity
    health_check(&pool).await?;
    info!("Database connection successful");

    run_migrations(&pool, &MIGRATOR).await?;

    let app_state = AppState::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(JournalRepository::new(pool.clone())),
    );

    let app = routes::create_router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Journal service listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Journal service stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(signal) => signal,
                Err(e) => {
                    tracing::warn!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    info!("Received Ctrl+C, shutting down...");
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
