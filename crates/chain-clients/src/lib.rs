//! chain-clients: Collaborator interfaces for the two bridge chains
//!
//! The bridge core never talks to a chain SDK directly. It goes through the
//! traits defined here: a read-only Proton RPC surface (implemented in this
//! crate over HTTP), and signing surfaces for both chains that the embedding
//! application provides (wallets sign outside this process).

pub mod metadata;
pub mod oracle;
pub mod proton;

use async_trait::async_trait;

use teleport_core::{
    Actor, DepositRecord, EvmAddress, EvmAsset, FeeBalance, FeeQuote, NativeAsset, RpcError,
    TxError,
};

pub use metadata::{MetadataCache, NftMetadata};
pub use oracle::OracleClient;
pub use proton::ProtonRpcClient;

/// EVM-chain bridge surface: asset inventory and lock transactions.
///
/// Lock calls submit the transaction and await chain confirmation before
/// resolving; the bridge core does not poll.
#[async_trait]
pub trait EvmBridge: Send + Sync {
    /// NFTs owned by the connected account
    async fn get_nfts(&self, account: &EvmAddress) -> Result<Vec<EvmAsset>, RpcError>;

    /// Transfer an ERC-721 into bridge custody and wait for confirmation
    async fn lock_erc721(
        &self,
        contract: &str,
        token_id: &str,
        owner: &EvmAddress,
    ) -> Result<(), TxError>;

    /// Transfer `amount` of an ERC-1155 into bridge custody and wait for confirmation
    async fn lock_erc1155(
        &self,
        contract: &str,
        token_id: &str,
        owner: &EvmAddress,
        amount: u64,
    ) -> Result<(), TxError>;
}

/// Proton-chain read surface: fee table, fee balances, assets, deposits.
#[async_trait]
pub trait ProtonChain: Send + Sync {
    async fn get_teleport_fees(&self) -> Result<Vec<FeeQuote>, RpcError>;

    async fn get_fees_balance(&self, actor: &Actor) -> Result<FeeBalance, RpcError>;

    /// The user's assets, restricted to those minted by the bridge account
    async fn get_bridge_assets(
        &self,
        actor: &Actor,
        bridge_account: &str,
    ) -> Result<Vec<NativeAsset>, RpcError>;

    /// Pending and claimed bridge deposits for an owner
    async fn list_deposits(&self, owner: &str) -> Result<Vec<DepositRecord>, RpcError>;
}

/// Proton-chain signing surface, provided by the embedding wallet session.
#[async_trait]
pub trait TeleportSigner: Send + Sync {
    /// Transfer NFTs to the bridge custody account with the teleport memo
    async fn transfer_to_bridge(
        &self,
        sender: &Actor,
        recipient: &str,
        asset_ids: &[String],
        memo: &str,
    ) -> Result<(), TxError>;

    /// Deposit XPR into the teleport fee balance
    async fn deposit_fee(&self, actor: &Actor, amount: f64) -> Result<(), TxError>;

    /// Withdraw XPR from the teleport fee balance
    async fn withdraw_fee(&self, actor: &Actor, amount: f64) -> Result<(), TxError>;
}

/// Bridge oracle liveness probe
#[async_trait]
pub trait BridgeOracle: Send + Sync {
    async fn is_up(&self) -> bool;
}
