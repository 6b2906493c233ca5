use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod db;
pub mod repository;
pub mod service;

use crate::config::Config;
use crate::repository::PgLogStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logminer_collector=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LogMiner collector...");

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;

    let pool = db::create_pool(&config.database_url, config.max_connections)
        .context("Failed to create database pool")?;

    tracing::info!("Database connection pool created");

    // An unreachable database is not fatal: uploads fail with 500 until it
    // comes back, and the schema is created on the first successful write.
    let store = PgLogStore::new(pool);
    if let Err(err) = store.ensure_schema().await {
        tracing::warn!("Database not ready, continuing without it: {}", err);
    }

    let state = api::AppState::new(Arc::new(store));
    let app = api::create_router(state);

    let addr = config.bind_addr()?;

    tracing::info!("LogCollector service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
