//! Gateway entry point.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use bazar_gateway::config::GatewayConfig;
use bazar_gateway::{app, GatewayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = GatewayState::new(&config);

    tracing::info!(%addr, "bazar gateway listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
