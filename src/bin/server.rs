//! Fund treasury server - in-memory JSON API
//!
//! # Usage
//! ```sh
//! SERVER_PORT=8080 cargo run --bin server
//! cargo run --bin server -- --no-seed
//! ```
//!
//! # Environment Variables
//! - `SERVER_HOST` / `SERVER_PORT` - Bind address (default: 0.0.0.0:5000)
//! - `CORS_ENABLED` - Permissive CORS (default: true)
//! - `SEED_DEMO_DATA` - Load demonstration funds at startup (default: true)
//! - `PROJECTION_HORIZONS`, `ALERT_WINDOW_DAYS`, `OUTLIER_MULTIPLIER`,
//!   `DEFAULT_REDEMPTION_DAYS` - Reporting parameters

use anyhow::{Context, Result};
use clap::Parser;
use fundtreasury::application::system::Application;
use fundtreasury::config::Config;
use fundtreasury::infrastructure::SystemClock;
use fundtreasury::interfaces::router;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Fund treasury management API", long_about = None)]
struct Args {
    /// Override SERVER_HOST
    #[arg(long)]
    host: Option<String>,

    /// Override SERVER_PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Start with an empty store
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Fund treasury server {} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.no_seed {
        config.seed_demo_data = false;
    }
    info!(
        "Configuration loaded: bind={}, cors={}, seed={}",
        config.bind_address(),
        config.cors_enabled,
        config.seed_demo_data
    );

    let bind_address = config.bind_address();
    let app = Arc::new(Application::build(config, Arc::new(SystemClock)).await?);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Listening on http://{}", bind_address);
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received. Draining connections..."),
        Err(e) => {
            warn!("Cannot listen for Ctrl+C ({}); running until killed", e);
            std::future::pending::<()>().await;
        }
    }
}
