//! Configuration types for Teleport

use serde::{Deserialize, Serialize};

/// Proton chain RPC endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Chain API URL (e.g., "https://proton.greymass.com")
    pub url: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://proton.greymass.com".to_string(),
        }
    }
}

/// Bridge contract and oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Bridge custody account on the Proton chain
    pub bridge_account: String,

    /// Health endpoint of the bridge oracle
    pub oracle_url: String,

    /// EVM chain ids the bridge accepts connections from
    #[serde(default = "default_chain_ids")]
    pub supported_chain_ids: Vec<i64>,
}

fn default_chain_ids() -> Vec<i64> {
    vec![137, 3]
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bridge_account: "prtbridge".to_string(),
            oracle_url: "https://oracle.prtbridge.com/health".to_string(),
            supported_chain_ids: default_chain_ids(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Proton RPC settings
    pub rpc: RpcConfig,

    /// Bridge settings
    pub bridge: BridgeConfig,

    /// API server bind host
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    19060
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            bridge: BridgeConfig::default(),
            api_host: default_api_host(),
            api_port: default_api_port(),
        }
    }
}
