//! HTTP ingress router.
//!
//! Accepts inbound HTTP requests, matches each against an ordered set of
//! host (+ optional path prefix) rules loaded once at startup, and forwards
//! matched requests to the configured backend origin. Unmatched requests
//! receive 404.
//!
//! # Startup Order
//!
//! ```text
//! Parse CLI → Load config → Init logging → Compile rule table
//!     → Bind listener → Serve
//! ```
//!
//! Any configuration error aborts the process before the listener binds.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use ingress_router::config::loader::load_config;
use ingress_router::http::HttpServer;
use ingress_router::lifecycle::Shutdown;
use ingress_router::observability::logging;

#[derive(Parser)]
#[command(name = "ingress-router")]
#[command(about = "Host-based HTTP ingress router", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    logging::init(&config.log_level);

    tracing::info!(
        config = %cli.config.display(),
        routes = config.routes.len(),
        rewrite = ?config.rewrite,
        "configuration loaded"
    );

    // Rule compilation fails fast on any invalid backend URL.
    let server = HttpServer::new(config.clone())?;

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "listening for connections"
    );

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
