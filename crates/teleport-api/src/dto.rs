//! Data Transfer Objects for API requests and responses

use serde::{Deserialize, Serialize};

use teleport::{ClaimPrompt, DepositView, FeeInfo, NoticeLevel, TeleportState};
use teleport_core::{ChainAsset, TokenKind, TransferDirection};

/// Bridge health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Bridge custody account this instance is configured for
    pub bridge_account: String,
    /// Whether the teleport fee table has been fetched from chain
    pub fees_loaded: bool,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new("upstream_error", message)
    }

    /// No signing backend has been injected for the requested chain
    pub fn signer_unavailable(chain: &str) -> Self {
        Self::new(
            "signer_unavailable",
            format!("No {} signing backend is available in this session", chain),
        )
    }
}

/// A user-facing notice produced while handling a request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeDto {
    /// "info", "warning", "error" or "success"
    pub level: String,
    pub message: String,
}

impl NoticeDto {
    pub fn new(level: NoticeLevel, message: &str) -> Self {
        let level = match level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
            NoticeLevel::Success => "success",
        };
        Self {
            level: level.to_string(),
            message: message.to_string(),
        }
    }
}

/// Connect an EVM wallet session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthConnectRequest {
    /// 0x-prefixed 20-byte hex address
    pub address: String,
    /// Chain id reported by the wallet, if known
    pub chain_id: Option<i64>,
}

/// Connect a Proton account session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtonConnectRequest {
    pub actor: String,
}

/// Combined wallet session status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatusResponse {
    pub eth_connected: bool,
    pub eth_address: Option<String>,
    pub chain_id: Option<i64>,
    pub proton_connected: bool,
    pub proton_actor: Option<String>,
}

/// Switch the active transfer direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionRequest {
    pub direction: TransferDirection,
}

/// Switch the token-kind filter for a direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindRequest {
    pub direction: TransferDirection,
    pub kind: TokenKind,
}

/// Replace the staged selection for a direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub direction: TransferDirection,
    pub assets: Vec<ChainAsset>,
}

/// Clear the staged selection for a direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearSelectionRequest {
    pub direction: TransferDirection,
}

/// Full bridge state for the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeStateResponse {
    #[serde(flatten)]
    pub state: TeleportState,
    /// Pending claim prompt, delivered at most once
    pub claim_prompt: Option<ClaimPrompt>,
}

/// Start a transfer for the active direction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Manually entered receiving address (Proton → ETH without a
    /// connected EVM wallet)
    #[serde(default)]
    pub receiver: Option<String>,
}

/// Transfer attempt outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    /// "locked", "topUpRequired" or "blocked"
    pub status: String,
    pub claim: Option<ClaimPrompt>,
    pub required: Option<f64>,
    pub available: Option<f64>,
    pub notices: Vec<NoticeDto>,
}

/// Top-up / withdraw outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBalanceResponse {
    pub success: bool,
    pub fees: FeeInfo,
    pub notices: Vec<NoticeDto>,
}

/// Withdraw XPR from the fee balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub amount: f64,
}

/// An owned asset with its resolved display metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    #[serde(flatten)]
    pub asset: ChainAsset,
    pub metadata: Option<chain_clients::NftMetadata>,
}

/// Asset inventory response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsResponse {
    pub assets: Vec<AssetDto>,
    pub count: usize,
}

/// Deposit tracking response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositsResponse {
    pub deposits: Vec<DepositView>,
    pub count: usize,
}
