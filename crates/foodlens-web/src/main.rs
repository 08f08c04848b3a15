//! FoodLens Web Server
//!
//! Run with: cargo run -p foodlens-web

use std::sync::Arc;

use anyhow::Context;
use foodlens_config::Config;
use foodlens_kg::Neo4jEvidenceStore;
use foodlens_ranker::RiskEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("foodlens=debug,info")),
        )
        .init();

    info!("Starting FoodLens web server...");

    let config = Config::load().context("loading configuration")?;

    let store = Neo4jEvidenceStore::connect(&config.store)
        .await
        .context("connecting to the evidence store")?;
    let engine = RiskEngine::new(Arc::new(store), config.scoring.clone())?
        .with_store_timeout(config.store.query_timeout());

    let state = foodlens_web::state::AppState::new(engine, config.web.clone())?;
    let app = foodlens_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.web.bind)
        .await
        .with_context(|| format!("binding {}", config.web.bind))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for shutdown signal");
    }
}
