//! Relay server: bridges viewer WebSockets to the exchange and proxies the market list.

pub mod error;
pub mod markets;
pub mod protocol;
pub mod server;
pub mod signals;
pub mod upstream;

pub use error::RelayError;
pub use protocol::{CandlesData, CandlesRequest, ClientEvent, ServerEvent, UpstreamError};
pub use server::{RelayState, router};

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use crate::config::RELAY;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "WebSocket relay between candle-view and the exchange", long_about = None)]
pub struct RelayCli {
    /// Address to listen on (serves both the WebSocket and GET /markets)
    #[arg(long, default_value = RELAY.bind_addr)]
    pub bind: String,

    /// Exchange WebSocket endpoint
    #[arg(long, default_value = RELAY.upstream.ws_url)]
    pub upstream_ws: String,

    /// Exchange market list endpoint
    #[arg(long, default_value = RELAY.upstream.markets_url)]
    pub markets_upstream: String,
}

/// Bind, serve until Ctrl+C
pub async fn run(args: RelayCli) -> anyhow::Result<()> {
    let state = RelayState::new(args.upstream_ws.clone(), args.markets_upstream.clone())
        .context("Failed to build relay state")?;

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    log::info!(
        "Relay listening on ws://{}{} (markets at {}), upstream {}",
        args.bind,
        RELAY.ws_path,
        RELAY.markets_path,
        args.upstream_ws
    );

    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Relay server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received, stopping relay");
}
