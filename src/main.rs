//! Fit Bridge - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the scoring API.

use fit_bridge::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fit_bridge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: gateway={}, agent={}, poll_interval={:?}, poll_timeout={:?}",
        config.gateway_url, config.agent_name, config.poll.interval, config.poll.timeout
    );

    api::serve(config).await?;

    Ok(())
}
