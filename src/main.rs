// recipe-gateway - Gemini-backed recipe and illustration gateway
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use recipe_gateway::cli::Args;
use recipe_gateway::config::AppConfig;
use recipe_gateway::server::create_router;
use recipe_gateway::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting recipe-gateway v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.api_key.is_empty() {
        warn!("No auth.api_key configured, the api-key gate is disabled");
    }
    if config.gemini.api_key.is_empty() {
        warn!("No gemini.api_key configured, recipe generation will fail");
    }
    if config.image_gen.url.is_empty() {
        warn!("No image_gen.url configured, image generation will fail");
    }
    info!("Recipe model: {}", config.gemini.model);

    // Phase 3: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 4: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
