//! Research proxy (v1)
//!
//! Forwards calls made by the research wizard front end to an upstream AI
//! provider, keeping provider endpoints and cross-origin concerns out of
//! the browser.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                  RESEARCH PROXY                   │
//!                     │                                                   │
//!   Browser request   │  ┌──────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ──────────────────┼─▶│   http   │──▶│ upstream │──▶│   upstream   │───┼──▶ AI provider
//!   /api/ai/<p>/...   │  │  server  │   │  target  │   │    client    │   │    <base>/api/...
//!                     │  └──────────┘   └──────────┘   └──────┬───────┘   │
//!                     │                                       │           │
//!   Browser response  │  ┌──────────┐                         │           │
//!   ◀─────────────────┼──│ response │◀────────────────────────┘           │
//!                     │  │ passthru │                                     │
//!                     │  └──────────┘                                     │
//!                     │                                                   │
//!                     │  config · observability · lifecycle               │
//!                     └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use research_proxy::config::{load_config, Overrides};
use research_proxy::http::HttpServer;
use research_proxy::lifecycle::Shutdown;
use research_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "research-proxy")]
#[command(about = "Reverse proxy between the research wizard and AI providers", long_about = None)]
struct Cli {
    /// Path to a TOML config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // .env is optional
    let _ = dotenvy::dotenv();

    let overrides = Overrides {
        bind_address: cli.bind,
    };
    let config = load_config(cli.config.as_deref(), overrides)?;

    logging::init(&config.observability);

    tracing::info!("research-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        providers = config.providers.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signal_watcher = shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
