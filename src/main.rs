//! SearchGate - cache-aside search gateway
//!
//! Answers text queries from a Redis cache when it can and from an
//! Elasticsearch index when it cannot, caching fresh results for a minute.

use anyhow::Context;
use clap::{Parser, Subcommand};
use searchgate_core::{GatewayConfig, SearchGateway, SeedError};
use searchgate_serve::GatewayServer;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "searchgate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SearchGate - cache-aside HTTP search gateway")]
#[command(long_about = r#"
SearchGate answers text queries from a key-value cache when it can and falls
back to a full-text search index when it cannot, caching the fresh result for
a short time.

Configuration is read from an optional file, SEARCHGATE__* environment
variables, and the conventional PORT, REDIS_URL, ELASTICSEARCH_NODE and
NODE_ENV variables.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log format (json, pretty, compact); overrides the configuration
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway (default)
    Serve {
        /// Host address to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Index the demo items into the search engine
    Seed,

    /// Check cache store and search engine reachability
    Health,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        GatewayConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(Commands::Serve { host, port }) = &cli.command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    config.validate().context("Invalid configuration")?;
    searchgate_core::init_logging(&config.logging.level, &config.logging.format)?;

    info!("Starting SearchGate v{}", searchgate_core::VERSION);

    match cli.command {
        None | Some(Commands::Serve { .. }) => handle_serve(&config).await,
        Some(Commands::Seed) => handle_seed(&config).await,
        Some(Commands::Health) => handle_health(&config).await,
        Some(Commands::Version) => {
            println!("{}", searchgate_core::version_info());
            Ok(())
        }
    }
}

async fn handle_serve(config: &GatewayConfig) -> anyhow::Result<()> {
    info!(
        "Cache: {:?} at {}, search: {}, mode: {}",
        config.cache.backend,
        config.cache.url,
        config.search.url.as_deref().unwrap_or("<not configured>"),
        config.mode
    );

    let server = GatewayServer::new(config)?;
    server.start().await?;
    Ok(())
}

async fn handle_seed(config: &GatewayConfig) -> anyhow::Result<()> {
    let gateway = SearchGateway::from_config(config)?;

    match gateway.seed().await {
        Ok(count) => {
            println!("Indexed {} demo items into {}", count, gateway.index());
            Ok(())
        }
        Err(SeedError::Disabled) => anyhow::bail!("Seeding is disabled in production mode"),
        Err(e) => Err(e.into()),
    }
}

async fn handle_health(config: &GatewayConfig) -> anyhow::Result<()> {
    let gateway = SearchGateway::from_config(config)?;
    let report = gateway.health().await;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_healthy() {
        std::process::exit(1);
    }
    Ok(())
}
