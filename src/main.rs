//! Strikeboard — Entry Point
//!
//! Options-chain dashboard backend. Serves ranked high-open-interest
//! call/put snapshots per symbol, plus the OAuth glue for the
//! brokerage identity provider.
//!
//! Wiring sequence:
//! 1. Load .env + config.toml, validate
//! 2. Init tracing (JSON structured logging)
//! 3. Load OAuth client credentials from env vars
//! 4. Create BrokerClient (chains + token endpoints, no retries)
//! 5. Serve the axum router until SIGINT

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::broker::auth::OAuthCredentials;
use adapters::broker::client::BrokerClient;
use adapters::http::{AppState, router};
use usecases::chain_view::ChainView;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load .env + config.toml ──────────────────────────
    dotenvy::dotenv().ok();

    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.server.log_level)
            }),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.server.bind_address,
        top_per_side = config.chain.top_per_side,
        "Starting strikeboard"
    );

    // ── 3. OAuth client credentials from env vars ───────────
    let credentials = OAuthCredentials::from_env()
        .context("Failed to load OAuth client credentials from env")?;

    // ── 4. Broker client backing both ports ─────────────────
    let broker = Arc::new(
        BrokerClient::new(credentials, &config.broker)
            .context("Failed to create broker client")?,
    );

    let state = AppState {
        chain_view: Arc::new(ChainView::new(broker.clone(), config.chain)),
        token_gateway: broker,
    };

    // ── 5. Serve until SIGINT ───────────────────────────────
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;
    info!(address = %config.server.bind_address, "Dashboard server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("SIGINT received, shutting down");
        })
        .await?;

    info!("Shutdown complete");
    Ok(())
}
