//! Vitals: a health-check service.
//!
//! This is the application entry point. It records the process start,
//! initializes tracing, loads configuration from TOML, builds the Axum router
//! with the health routes, and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitals::config::{AppConfig, LoggingConfig, DEFAULT_LOG_FILTER, MEMORY_THRESHOLD_PERCENT};
use vitals::health::uptime::mark_process_start;
use vitals::http::start_server;
use vitals::routes::create_router;
use vitals::state::AppState;

/// Vitals: health checks for liveness and readiness probes
#[derive(Parser, Debug)]
#[command(name = "vitals", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "vitals=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(log_filter: &str, logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(log_filter);
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Uptime is measured from here
    mark_process_start();

    let args = Args::parse();

    // Configuration decides the log format, so it is loaded before tracing starts
    let config = AppConfig::load_or_default(args.config.as_deref())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        config = args.config.as_deref().unwrap_or("<default>"),
        memory_limit_mb = ?config.memory.limit_mb,
        threshold_percent = MEMORY_THRESHOLD_PERCENT,
        "Loaded configuration"
    );

    let state = AppState::from_config(&config);
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}
