//! Error types for Teleport

use thiserror::Error;

/// Core errors that can occur in Teleport
#[derive(Debug, Error)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Transaction error: {0}")]
    Tx(#[from] TxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Chain RPC transport and query errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Endpoint unreachable at {url}")]
    Unreachable { url: String },

    #[error("Endpoint returned error: {message}")]
    ApiError { message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Table '{table}' not found on contract {contract}")]
    TableNotFound { table: String, contract: String },
}

/// Bridge-transfer validation and consistency errors
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Bridge oracle is down")]
    OracleDown,

    #[error("Fee data not loaded: {what}")]
    FeeDataMissing { what: &'static str },

    #[error("No usable fee row for chain {chain_id}")]
    FeeUnavailable { chain_id: i64 },

    #[error("No assets staged for transfer")]
    EmptySelection,

    #[error("No {chain} wallet connected")]
    WalletNotConnected { chain: &'static str },

    #[error("No receiving address available")]
    NoReceiver,

    #[error("Insufficient fee balance: need {required}, have {available}")]
    InsufficientFeeBalance { required: f64, available: f64 },

    #[error("A transfer is already in flight")]
    TransferInFlight,

    #[error("Inconsistent fee balance: reserved {reserved} exceeds balance {balance}")]
    InconsistentBalance { balance: f64, reserved: f64 },
}

/// Chain transaction errors (lock, transfer, deposit)
#[derive(Debug, Error)]
pub enum TxError {
    #[error("Signing rejected: {message}")]
    SigningRejected { message: String },

    #[error("Transaction reverted: {message}")]
    Reverted { message: String },

    #[error("Transaction submission failed: {message}")]
    SubmissionFailed { message: String },

    #[error("Chain RPC failure: {message}")]
    Rpc { message: String },
}

/// Result type alias for Teleport operations
pub type Result<T> = std::result::Result<T, Error>;

impl BridgeError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::OracleDown => "oracle_down",
            Self::FeeDataMissing { .. } => "fee_data_missing",
            Self::FeeUnavailable { .. } => "fee_unavailable",
            Self::EmptySelection => "empty_selection",
            Self::WalletNotConnected { .. } => "wallet_not_connected",
            Self::NoReceiver => "no_receiver",
            Self::InsufficientFeeBalance { .. } => "insufficient_fee_balance",
            Self::TransferInFlight => "transfer_in_flight",
            Self::InconsistentBalance { .. } => "inconsistent_balance",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptySelection | Self::NoReceiver => 400,
            Self::WalletNotConnected { .. } => 401,
            Self::InsufficientFeeBalance { .. } | Self::TransferInFlight => 409,
            Self::FeeUnavailable { .. } | Self::InconsistentBalance { .. } => 422,
            Self::OracleDown | Self::FeeDataMissing { .. } => 503,
        }
    }
}
