//! Config bridge server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser / client                      config-bridge
//!   ┌──────────────┐   GET config route   ┌───────────────────────────┐
//!   │ ConfigLoader │ ───────────────────▶ │ http::config_proxy        │
//!   │ (load once,  │                      │   reads env on each call  │
//!   │  share)      │ ◀─────────────────── │   VITE_FIREBASE_* / FIRE… │
//!   └──────┬───────┘   { apiKey, ... }    └───────────────────────────┘
//!          │
//!          ▼
//!   BackendConnector::configure → backend client handle
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use config_bridge::backend::Environment;
use config_bridge::config::{load_config, ServiceConfig};
use config_bridge::http::HttpServer;
use config_bridge::lifecycle::Shutdown;
use config_bridge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "config-bridge")]
#[command(about = "Serves backend client configuration to the booking site", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // A missing .env file is normal outside local development.
    let dotenv = dotenvy::dotenv();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("config-bridge v{} starting", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        route = %config.proxy.route,
        allow_origin = %config.proxy.allow_origin,
        "Configuration loaded"
    );
    if config.proxy.allow_origin == "*" {
        tracing::warn!("Config route allows any origin; set proxy.allow_origin to restrict it");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Environment::process())?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
