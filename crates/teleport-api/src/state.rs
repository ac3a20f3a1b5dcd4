//! Application state shared across API handlers

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;

use chain_clients::{BridgeOracle, EvmBridge, MetadataCache, ProtonChain, TeleportSigner};
use teleport::{
    ClaimPrompt, ClaimSink, FeeTable, NoticeLevel, Notifier, SelectionSet, TransferDirector,
};
use teleport_core::{Actor, AppConfig, EvmAddress, TransferDirection};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use crate::dto::NoticeDto;

/// Errors that can occur managing wallet sessions
#[derive(Debug, Error)]
pub enum SessionError {
    /// Malformed EVM address
    #[error("Invalid wallet address: {reason}")]
    InvalidAddress { reason: String },

    /// Empty or malformed Proton account name
    #[error("Invalid account name: {reason}")]
    InvalidActor { reason: String },
}

/// A connected EVM wallet session
#[derive(Clone, Debug)]
pub struct EthSession {
    pub account: EvmAddress,
    /// Chain id reported by the wallet at connect time
    pub chain_id: Option<i64>,
    pub connected_at: Instant,
}

/// A signed-in Proton account session
#[derive(Clone, Debug)]
pub struct ProtonSession {
    pub actor: Actor,
    pub connected_at: Instant,
}

/// Per-session bridge state: direction, fee cache, staged selection and the
/// transfer director. Held behind one lock so a transfer sees a consistent
/// view.
pub struct BridgeSession {
    pub direction: TransferDirection,
    pub fees: FeeTable,
    pub selection: SelectionSet,
    pub director: TransferDirector,
}

/// Holds the claim prompt scheduled after a confirmed lock until the
/// frontend picks it up. Delivery is at most once.
#[derive(Default)]
pub struct ClaimInbox(StdMutex<Option<ClaimPrompt>>);

impl ClaimInbox {
    pub fn take(&self) -> Option<ClaimPrompt> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl ClaimSink for ClaimInbox {
    fn open_claim_prompt(&self, prompt: ClaimPrompt) {
        if let Ok(mut slot) = self.0.lock() {
            // Only one prompt is held; a second confirmed lock before the
            // frontend polls replaces the unclaimed one.
            if let Some(stale) = slot.replace(prompt) {
                tracing::warn!(
                    "Replacing unclaimed prompt for {} token {}",
                    stale.token_contract,
                    stale.token_id
                );
            }
        }
    }
}

/// Collects notices produced while handling one request so they can be
/// returned in the response body.
#[derive(Default)]
pub struct RequestNotices(StdMutex<Vec<NoticeDto>>);

impl RequestNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_vec(self) -> Vec<NoticeDto> {
        self.0.into_inner().unwrap_or_default()
    }
}

impl Notifier for RequestNotices {
    fn notify(&self, level: NoticeLevel, message: &str) {
        tracing::info!("notice ({:?}): {}", level, message);
        if let Ok(mut notices) = self.0.lock() {
            notices.push(NoticeDto::new(level, message));
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    chain: Arc<dyn ProtonChain>,
    oracle: Arc<dyn BridgeOracle>,
    // Signing backends are injected by the embedding wallet session; absent
    // until then, and transfer routes answer 503.
    evm: RwLock<Option<Arc<dyn EvmBridge>>>,
    signer: RwLock<Option<Arc<dyn TeleportSigner>>>,
    eth_session: RwLock<Option<EthSession>>,
    proton_session: RwLock<Option<ProtonSession>>,
    bridge: Mutex<BridgeSession>,
    claim_inbox: Arc<ClaimInbox>,
    metadata: MetadataCache,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        chain: Arc<dyn ProtonChain>,
        oracle: Arc<dyn BridgeOracle>,
    ) -> Self {
        let director = TransferDirector::new(config.bridge.bridge_account.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                chain,
                oracle,
                evm: RwLock::new(None),
                signer: RwLock::new(None),
                eth_session: RwLock::new(None),
                proton_session: RwLock::new(None),
                bridge: Mutex::new(BridgeSession {
                    direction: TransferDirection::EthToProton,
                    fees: FeeTable::new(),
                    selection: SelectionSet::new(),
                    director,
                }),
                claim_inbox: Arc::new(ClaimInbox::default()),
                metadata: MetadataCache::new(),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    pub fn chain(&self) -> &dyn ProtonChain {
        self.inner.chain.as_ref()
    }

    pub fn oracle(&self) -> &dyn BridgeOracle {
        self.inner.oracle.as_ref()
    }

    pub fn claim_inbox(&self) -> Arc<ClaimInbox> {
        self.inner.claim_inbox.clone()
    }

    pub fn metadata(&self) -> &MetadataCache {
        &self.inner.metadata
    }

    /// Inject the EVM signing backend
    pub async fn set_evm_bridge(&self, evm: Arc<dyn EvmBridge>) {
        *self.inner.evm.write().await = Some(evm);
    }

    /// Inject the Proton signing backend
    pub async fn set_signer(&self, signer: Arc<dyn TeleportSigner>) {
        *self.inner.signer.write().await = Some(signer);
    }

    pub async fn evm_bridge(&self) -> Option<Arc<dyn EvmBridge>> {
        self.inner.evm.read().await.clone()
    }

    pub async fn signer(&self) -> Option<Arc<dyn TeleportSigner>> {
        self.inner.signer.read().await.clone()
    }

    /// Exclusive access to the bridge session
    pub async fn bridge(&self) -> tokio::sync::MutexGuard<'_, BridgeSession> {
        self.inner.bridge.lock().await
    }

    pub async fn eth_session(&self) -> Option<EthSession> {
        self.inner.eth_session.read().await.clone()
    }

    pub async fn proton_session(&self) -> Option<ProtonSession> {
        self.inner.proton_session.read().await.clone()
    }

    /// Connect an EVM wallet session with address validation.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidAddress` if the address is not a
    /// 0x-prefixed 20-byte hex string.
    pub async fn connect_eth(
        &self,
        address: String,
        chain_id: Option<i64>,
    ) -> Result<EthSession, SessionError> {
        let account = EvmAddress::new(address);
        if !account.is_well_formed() {
            return Err(SessionError::InvalidAddress {
                reason: "expected a 0x-prefixed 40-character hex address".to_string(),
            });
        }

        let session = EthSession {
            account,
            chain_id,
            connected_at: Instant::now(),
        };
        *self.inner.eth_session.write().await = Some(session.clone());
        Ok(session)
    }

    pub async fn disconnect_eth(&self) {
        *self.inner.eth_session.write().await = None;
    }

    /// Sign in a Proton account and refetch its fee-balance snapshot.
    pub async fn connect_proton(&self, actor: String) -> Result<ProtonSession, SessionError> {
        let actor = actor.trim().to_string();
        let valid_chars = actor.chars().all(|c| matches!(c, 'a'..='z' | '1'..='5'));
        if actor.is_empty() || actor.len() > 12 || !valid_chars {
            return Err(SessionError::InvalidActor {
                reason: "expected 1-12 characters from a-z and 1-5".to_string(),
            });
        }

        let session = ProtonSession {
            actor: Actor::new(actor),
            connected_at: Instant::now(),
        };
        *self.inner.proton_session.write().await = Some(session.clone());

        let mut bridge = self.inner.bridge.lock().await;
        bridge
            .fees
            .refresh_balance(self.chain(), &session.actor)
            .await;

        Ok(session)
    }

    /// Sign out the Proton account and drop its fee-balance snapshot.
    pub async fn disconnect_proton(&self) {
        *self.inner.proton_session.write().await = None;
        let mut bridge = self.inner.bridge.lock().await;
        bridge.fees.clear_balance();
    }

    /// Fetch the fee table if it has not been fetched yet.
    pub async fn ensure_fees_loaded(&self) {
        let actor = self.proton_session().await.map(|s| s.actor);
        let mut bridge = self.inner.bridge.lock().await;
        if !bridge.fees.is_loaded() {
            bridge.fees.load(self.chain(), actor.as_ref()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use teleport_core::{
        DepositRecord, FeeBalance, FeeQuote, NativeAsset, RpcError,
    };

    struct StubChain;

    #[async_trait]
    impl ProtonChain for StubChain {
        async fn get_teleport_fees(&self) -> Result<Vec<FeeQuote>, RpcError> {
            Ok(vec![FeeQuote {
                chain_id: 0,
                port_in_fee: 1.0,
                port_out_fee: 1.0,
            }])
        }

        async fn get_fees_balance(&self, actor: &Actor) -> Result<FeeBalance, RpcError> {
            Ok(FeeBalance {
                owner: actor.as_str().to_string(),
                balance: 4.0,
                reserved: 1.0,
            })
        }

        async fn get_bridge_assets(
            &self,
            _actor: &Actor,
            _bridge_account: &str,
        ) -> Result<Vec<NativeAsset>, RpcError> {
            Ok(vec![])
        }

        async fn list_deposits(&self, _owner: &str) -> Result<Vec<DepositRecord>, RpcError> {
            Ok(vec![])
        }
    }

    struct StubOracle;

    #[async_trait]
    impl BridgeOracle for StubOracle {
        async fn is_up(&self) -> bool {
            true
        }
    }

    fn state() -> AppState {
        AppState::new(AppConfig::default(), Arc::new(StubChain), Arc::new(StubOracle))
    }

    #[tokio::test]
    async fn test_eth_connect_validates_address() {
        let state = state();

        let err = state.connect_eth("bogus".to_string(), Some(137)).await;
        assert!(matches!(err, Err(SessionError::InvalidAddress { .. })));
        assert!(state.eth_session().await.is_none());

        let session = state
            .connect_eth(
                "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD08".to_string(),
                Some(137),
            )
            .await
            .unwrap();
        assert_eq!(session.chain_id, Some(137));
        assert!(state.eth_session().await.is_some());

        state.disconnect_eth().await;
        assert!(state.eth_session().await.is_none());
    }

    #[tokio::test]
    async fn test_proton_connect_validates_account_name() {
        let state = state();

        for bad in ["", "Alice", "alice.nft!", "a6c", "verylongaccount"] {
            let err = state.connect_proton(bad.to_string()).await;
            assert!(
                matches!(err, Err(SessionError::InvalidActor { .. })),
                "accepted '{}'",
                bad
            );
        }
        assert!(state.proton_session().await.is_none());

        state.connect_proton("alice12345".to_string()).await.unwrap();
        assert!(state.proton_session().await.is_some());
    }

    #[tokio::test]
    async fn test_proton_connect_fetches_balance_and_disconnect_drops_it() {
        let state = state();

        state.connect_proton("alice".to_string()).await.unwrap();
        {
            let bridge = state.bridge().await;
            assert_eq!(bridge.fees.snapshot().map(|s| s.available()), Some(3.0));
        }

        state.disconnect_proton().await;
        let bridge = state.bridge().await;
        assert!(bridge.fees.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_ensure_fees_loaded_is_idempotent() {
        let state = state();
        state.ensure_fees_loaded().await;
        state.ensure_fees_loaded().await;
        let bridge = state.bridge().await;
        assert!(bridge.fees.is_loaded());
        assert_eq!(bridge.fees.quotes().len(), 1);
    }

    #[test]
    fn test_claim_inbox_delivers_once() {
        let inbox = ClaimInbox::default();
        assert!(inbox.take().is_none());

        inbox.open_claim_prompt(ClaimPrompt {
            eth_to_proton: true,
            token_contract: "0xabc".to_string(),
            token_id: "7".to_string(),
            asset_id: None,
            receiver: "alice".to_string(),
            created_at: 1,
        });
        assert!(inbox.take().is_some());
        assert!(inbox.take().is_none());
    }

    #[test]
    fn test_claim_inbox_keeps_latest_on_overwrite() {
        let inbox = ClaimInbox::default();
        let prompt = |token_id: &str| ClaimPrompt {
            eth_to_proton: true,
            token_contract: "0xabc".to_string(),
            token_id: token_id.to_string(),
            asset_id: None,
            receiver: "alice".to_string(),
            created_at: 1,
        };

        inbox.open_claim_prompt(prompt("7"));
        inbox.open_claim_prompt(prompt("8"));

        let delivered = inbox.take().unwrap();
        assert_eq!(delivered.token_id, "8");
        assert!(inbox.take().is_none());
    }
}
