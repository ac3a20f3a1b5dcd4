//! Teleport bridge API server binary
//!
//! Wires the concrete Proton RPC and oracle clients into the shared state
//! and serves the HTTP API. Signing backends are injected by the embedding
//! wallet session, not here.

use std::sync::Arc;

use anyhow::Context;
use chain_clients::{OracleClient, ProtonRpcClient};
use teleport_api::{start_server, AppState};
use teleport_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("teleport=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting teleport bridge server");

    let config = load_config()?;

    let chain = ProtonRpcClient::new(&config.rpc, config.bridge.bridge_account.clone())
        .map_err(|e| anyhow::anyhow!("Failed to build Proton RPC client: {}", e))?;
    let oracle = OracleClient::new(config.bridge.oracle_url.clone());

    let state = AppState::new(config, Arc::new(chain), Arc::new(oracle));

    start_server(state)
        .await
        .context("API server exited with an error")?;

    Ok(())
}

/// Load config from the file named by TELEPORT_CONFIG, or fall back to
/// built-in defaults.
fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var("TELEPORT_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path))?;
            let config: AppConfig = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file {}", path))?;
            tracing::info!("Loaded config from {}", path);
            Ok(config)
        }
        Err(_) => {
            tracing::info!("TELEPORT_CONFIG not set, using defaults");
            Ok(AppConfig::default())
        }
    }
}
