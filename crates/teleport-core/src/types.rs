//! Core type definitions for Teleport

use serde::{Deserialize, Serialize};
use std::fmt;

/// Proton account name (1-12 chars, a-z and 1-5)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(pub String);

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EVM account or contract address ("0x" + 40 hex chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvmAddress(pub String);

impl EvmAddress {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Basic format check: "0x" prefix, 40 hex characters.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 42
            && self.0.starts_with("0x")
            && self.0[2..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of token contract on the EVM chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "erc721")]
    Erc721,
    #[serde(rename = "erc1155")]
    Erc1155,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Erc721 => "erc721",
            Self::Erc1155 => "erc1155",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a teleport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferDirection {
    EthToProton,
    ProtonToEth,
}

impl TransferDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EthToProton => "ETH_TO_PROTON",
            Self::ProtonToEth => "PROTON_TO_ETH",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::EthToProton => Self::ProtonToEth,
            Self::ProtonToEth => Self::EthToProton,
        }
    }
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An NFT on the EVM chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmAsset {
    pub contract_address: String,
    pub token_id: String,
    pub kind: TokenKind,
    /// Metadata document URI; name/image are resolved lazily and cached by URI
    pub token_uri: Option<String>,
}

/// A bridge-created NFT on the Proton chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAsset {
    pub asset_id: String,
    pub collection_author: String,
    pub token_uri: Option<String>,
    /// Origin EVM contract address, raw bytes as stored on chain
    pub contract_address_bytes: Vec<u8>,
    /// Origin EVM token id, raw bytes as stored on chain
    pub token_id_bytes: Vec<u8>,
}

/// Unique identity of an asset within a selection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Evm { contract: String, token_id: String },
    Native { asset_id: String },
}

/// An asset on either side of the bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "chain", content = "asset", rename_all = "camelCase")]
pub enum ChainAsset {
    Evm(EvmAsset),
    Native(NativeAsset),
}

impl ChainAsset {
    /// Identity under which selection sets deduplicate
    pub fn identity(&self) -> AssetKey {
        match self {
            Self::Evm(a) => AssetKey::Evm {
                contract: a.contract_address.clone(),
                token_id: a.token_id.clone(),
            },
            Self::Native(a) => AssetKey::Native {
                asset_id: a.asset_id.clone(),
            },
        }
    }

    pub fn metadata_uri(&self) -> Option<&str> {
        match self {
            Self::Evm(a) => a.token_uri.as_deref(),
            Self::Native(a) => a.token_uri.as_deref(),
        }
    }

    /// Token kind, known only for EVM assets
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Self::Evm(a) => Some(a.kind),
            Self::Native(_) => None,
        }
    }
}

/// Per-chain teleport fee quote
///
/// `chain_id == 0` is the designated fallback row. A negative `chain_id`
/// is the "fees unavailable" sentinel; callers must block transfers on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub chain_id: i64,
    pub port_in_fee: f64,
    pub port_out_fee: f64,
}

impl FeeQuote {
    /// The "fees unavailable" sentinel row
    pub fn sentinel() -> Self {
        Self {
            chain_id: -1,
            port_in_fee: 0.0,
            port_out_fee: 0.0,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.chain_id >= 0
    }

    /// Fee applicable to the given direction
    pub fn fee_for(&self, direction: TransferDirection) -> f64 {
        match direction {
            TransferDirection::EthToProton => self.port_in_fee,
            TransferDirection::ProtonToEth => self.port_out_fee,
        }
    }
}

/// User's chain-side fee balance snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBalance {
    pub owner: String,
    pub balance: f64,
    pub reserved: f64,
}

impl FeeBalance {
    /// Spendable balance. Deliberately not clamped: a negative value means
    /// the chain reports more reserved than held and must be surfaced.
    pub fn available(&self) -> f64 {
        self.balance - self.reserved
    }
}

/// A bridge deposit row from the chain's deposit table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    pub index: u64,
    pub owner: String,
    pub token_contract: String,
    pub token_id: String,
    pub receiver: String,
    pub claimed: bool,
    pub created_at: u64,
}

/// Constants
pub mod constants {
    /// Fee currency symbol
    pub const XPR_SYMBOL: &str = "XPR";

    /// Display precision for XPR amounts
    pub const XPR_DECIMALS: usize = 4;
}

/// Fixed 4-decimal display formatting for XPR amounts.
/// Comparisons always use the unrounded value; only display rounds.
pub fn format_xpr(amount: f64) -> String {
    format!("{:.4}", amount)
}
