//! SmartTrack - Virtual Hardware Node
//!
//! Serves the simulated structural-health-monitoring anchor node as a
//! live dashboard: three synthetic sensor waveforms, a mock on-edge
//! classifier, status LEDs and the alert payload the node would send.
//!
//! # Usage
//!
//! ```bash
//! # Serve on the default address with built-in node settings
//! cargo run --release
//!
//! # Use a specific node config and bind address
//! cargo run --release -- --config node_config.toml --addr 127.0.0.1:9000
//! ```
//!
//! # Environment Variables
//!
//! - `SMARTTRACK_CONFIG`: Path to the node config TOML
//! - `SMARTTRACK_ADDR`: Bind address (overridden by `--addr`)
//! - `SMARTTRACK_CORS_ORIGINS`: Comma-separated allowed CORS origins
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use smarttrack::api::{create_app, DashboardState};
use smarttrack::config::NodeConfig;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "smarttrack")]
#[command(about = "SmartTrack virtual anchor node dashboard")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Node config file; skips the SMARTTRACK_CONFIG / ./node_config.toml search
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed every refresh with a fixed value (reproducible demo output)
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(path: Option<&PathBuf>) -> Result<NodeConfig> {
    match path {
        Some(path) => {
            let config = NodeConfig::load_from_file(path)
                .with_context(|| format!("Failed to load node config {}", path.display()))?;
            info!(path = %path.display(), node = %config.node.id, "Loaded node config from --config");
            Ok(config)
        }
        None => Ok(NodeConfig::load()),
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let node_config = load_config(args.config.as_ref())?;
    let server_addr = args.addr.unwrap_or_else(|| node_config.server_addr());

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  SmartTrack - Virtual Hardware Node (Simulation Prototype)");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        "Node: {} | GPS: {} | Edge CPU: {}",
        node_config.node.id,
        node_config.node.gps_display(),
        node_config.node.edge_cpu
    );
    info!(
        "Periodic window: {}s | Auto-refresh: {}s",
        node_config.simulation.periodic_window_secs, node_config.simulation.auto_refresh_secs
    );

    let mut dashboard_state = DashboardState::new(node_config);
    if let Some(seed) = args.seed {
        info!(seed, "Seeding every refresh with a fixed value");
        dashboard_state = dashboard_state.with_seed(seed);
    }
    let app = create_app(dashboard_state);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", server_addr))?;

    info!("✓ HTTP server listening on {}", server_addr);
    info!("🎯 Dashboard available at: http://{}", server_addr);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await;

    match result {
        Ok(()) => {
            info!("[HttpServer] Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("[HttpServer] Server error: {}", e);
            Err(anyhow::anyhow!("HTTP server error: {}", e))
        }
    }
}
