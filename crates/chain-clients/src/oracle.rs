//! Bridge oracle health probe
//!
//! The teleport oracle relays lock events between chains. Transfers are
//! pointless while it is down, so the director checks it before anything
//! else.

use async_trait::async_trait;

use crate::BridgeOracle;

/// HTTP health probe against the oracle endpoint
#[derive(Clone)]
pub struct OracleClient {
    http: reqwest::Client,
    url: String,
}

impl OracleClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("teleport")
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl BridgeOracle for OracleClient {
    async fn is_up(&self) -> bool {
        match self.http.get(&self.url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Oracle health check failed: {}", e);
                false
            }
        }
    }
}
