//! NFT metadata resolution
//!
//! Assets carry a metadata document URI; name and image are fetched lazily
//! and cached by URI so list views don't re-fetch on every render.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Resolved display metadata for an NFT
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: Option<String>,
    pub image: Option<String>,
}

/// By-URI metadata cache over an HTTP fetcher
#[derive(Clone)]
pub struct MetadataCache {
    http: reqwest::Client,
    cache: Arc<RwLock<HashMap<String, NftMetadata>>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("teleport")
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Resolve metadata for a token URI, consulting the cache first.
    ///
    /// Returns `None` on transport failure or a malformed document; failures
    /// are not cached so a later retry can succeed.
    pub async fn resolve(&self, uri: &str) -> Option<NftMetadata> {
        {
            let cache = self.cache.read().await;
            if let Some(meta) = cache.get(uri) {
                return Some(meta.clone());
            }
        }

        let meta = self.fetch(uri).await?;

        let mut cache = self.cache.write().await;
        cache.insert(uri.to_string(), meta.clone());
        Some(meta)
    }

    /// Seed the cache directly (used when metadata arrives inline)
    pub async fn insert(&self, uri: impl Into<String>, meta: NftMetadata) {
        let mut cache = self.cache.write().await;
        cache.insert(uri.into(), meta);
    }

    async fn fetch(&self, uri: &str) -> Option<NftMetadata> {
        let response = match self.http.get(uri).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Metadata fetch failed for {}: {}", uri, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Metadata fetch for {} returned {}", uri, response.status());
            return None;
        }

        match response.json::<NftMetadata>().await {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::debug!("Malformed metadata document at {}: {}", uri, e);
                None
            }
        }
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}
