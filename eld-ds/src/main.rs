//! eld-ds - Design Synthesis service
//!
//! Accepts floor plan uploads, runs room detection (with a fixed demo
//! fallback), synthesizes per-room lighting designs, and applies chat-driven
//! design mutations while keeping metrics and cost consistent.

use anyhow::Result;
use clap::Parser;
use eld_common::config::{ConfigOverrides, ServiceConfig};
use eld_common::events::EventBus;
use eld_ds::services::room_detector::RoomDetector;
use eld_ds::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eld-ds", about = "ELD design synthesis service")]
struct Args {
    /// HTTP server port (overrides ELD_PORT and the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Room detector endpoint URL (overrides ELD_DETECTOR_URL and the config file)
    #[arg(long)]
    detector_url: Option<String>,

    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ServiceConfig::resolve(
        "eld-ds",
        ConfigOverrides {
            port: args.port,
            detector_url: args.detector_url,
            config_path: args.config,
        },
    );

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting eld-ds (Design Synthesis) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    match &config.detector_url {
        Some(url) => info!("Room detector: {}", url),
        None => info!("Room detector: not configured, demo analysis in use"),
    }

    // Create event bus for SSE broadcasting
    let event_bus = EventBus::new(100);

    let detector = RoomDetector::new(config.detector_url.clone(), config.detector_timeout_secs);

    // Create application state and router
    let state = AppState::new(event_bus, detector);
    let app = eld_ds::build_router(state);

    // Start server
    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
