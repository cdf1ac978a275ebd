//! Live Timing Relay Server
//!
//! Proxies the upstream live-timing provider and serves simulated or
//! pre-captured timing data for demos.

use anyhow::Result;
use ltr_server::{api, config::ServerConfig, state};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Live Timing Relay");

    let config = ServerConfig::from_env();
    let state = state::AppState::from_config(&config)?;
    info!("Proxying only to {}", state.upstream.allowed_host());

    let app = api::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);
    info!("   /health            -> health check");
    info!("   /proxy?url=        -> upstream proxy");
    info!("   /test              -> captured snapshot");
    info!("   /test/live         -> simulated race");
    info!("   /test/live/stream  -> simulated race (SSE)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
