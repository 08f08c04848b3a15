use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foodlens_config::Config;
use foodlens_kg::Neo4jEvidenceStore;
use foodlens_ranker::RiskEngine;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::score::ScoreArgs;

#[derive(Parser)]
#[command(name = "foodlens")]
#[command(about = "Rank diseases associated with a list of food ingredients")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score ingredients against the evidence graph
    Score(ScoreArgs),

    /// List ingredients known to the evidence graph
    Ingredients,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().context("loading configuration")?;
    let store = Neo4jEvidenceStore::connect(&config.store)
        .await
        .context("connecting to the evidence store")?;
    let engine = RiskEngine::new(Arc::new(store), config.scoring.clone())?
        .with_store_timeout(config.store.query_timeout());

    match cli.command {
        Commands::Score(args) => commands::score::execute(&engine, args).await,
        Commands::Ingredients => commands::ingredients::execute(&engine).await,
    }
}
