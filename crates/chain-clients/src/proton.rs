//! Proton chain RPC read client
//!
//! Thin typed wrappers over the chain's `get_table_rows` endpoint for the
//! bridge contract tables: fee parameters, per-user fee balances, deposit
//! records, and bridge-minted assets. Amounts arrive as 4-decimal asset
//! strings ("1.0000 XPR") and are parsed to f64 here so the rest of the
//! workspace never sees the wire format.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use teleport_core::{
    Actor, DepositRecord, FeeBalance, FeeQuote, NativeAsset, RpcConfig, RpcError,
};

use crate::ProtonChain;

/// Request timeout for chain API calls.
const RPC_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Default row limit for table scans
const TABLE_ROW_LIMIT: u32 = 100;

/// HTTP client for the Proton chain API
#[derive(Clone)]
pub struct ProtonRpcClient {
    http: reqwest::Client,
    base_url: String,
    bridge_contract: String,
}

#[derive(Serialize)]
struct TableRowsRequest<'a> {
    json: bool,
    code: &'a str,
    scope: &'a str,
    table: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lower_bound: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_bound: Option<&'a str>,
    limit: u32,
}

#[derive(Deserialize)]
struct TableRowsResponse<T> {
    rows: Vec<T>,
}

/// Fee table row as stored on chain
#[derive(Debug, Deserialize)]
struct RawFeeRow {
    chain_id: i64,
    port_in_fee: String,
    port_out_fee: String,
}

/// Fee balance row as stored on chain
#[derive(Debug, Deserialize)]
struct RawBalanceRow {
    owner: String,
    balance: String,
    reserved: String,
}

/// Deposit row as stored on chain
#[derive(Debug, Deserialize)]
struct RawDepositRow {
    index: u64,
    owner: String,
    token_contract: String,
    token_id: String,
    to_address: String,
    #[serde(default)]
    claimed: bool,
    #[serde(default)]
    created_at: u64,
}

/// Bridge-minted asset row as stored on chain
#[derive(Debug, Deserialize)]
struct RawAssetRow {
    asset_id: String,
    author: String,
    #[serde(default)]
    token_uri: Option<String>,
    #[serde(default)]
    contract_address: Vec<u8>,
    #[serde(default)]
    token_id: Vec<u8>,
}

impl ProtonRpcClient {
    pub fn new(config: &RpcConfig, bridge_contract: impl Into<String>) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder()
            .user_agent("teleport")
            .timeout(RPC_TIMEOUT)
            .build()
            .map_err(|e| RpcError::ApiError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            bridge_contract: bridge_contract.into(),
        })
    }

    async fn get_table_rows<T: DeserializeOwned>(
        &self,
        scope: &str,
        table: &str,
        bounds: Option<&str>,
    ) -> Result<Vec<T>, RpcError> {
        let url = format!("{}/v1/chain/get_table_rows", self.base_url);
        let request = TableRowsRequest {
            json: true,
            code: &self.bridge_contract,
            scope,
            table,
            lower_bound: bounds,
            upper_bound: bounds,
            limit: TABLE_ROW_LIMIT,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::Unreachable {
                url: format!("{}: {}", url, e),
            })?;

        if !response.status().is_success() {
            return Err(RpcError::ApiError {
                message: format!("get_table_rows {} returned {}", table, response.status()),
            });
        }

        let body: TableRowsResponse<T> = response
            .json()
            .await
            .map_err(|e| RpcError::ParseError(format!("table {}: {}", table, e)))?;

        Ok(body.rows)
    }
}

#[async_trait]
impl ProtonChain for ProtonRpcClient {
    async fn get_teleport_fees(&self) -> Result<Vec<FeeQuote>, RpcError> {
        let scope = self.bridge_contract.clone();
        let rows: Vec<RawFeeRow> = self.get_table_rows(&scope, "fees", None).await?;

        rows.iter().map(parse_fee_row).collect()
    }

    async fn get_fees_balance(&self, actor: &Actor) -> Result<FeeBalance, RpcError> {
        let scope = self.bridge_contract.clone();
        let rows: Vec<RawBalanceRow> = self
            .get_table_rows(&scope, "feebalances", Some(actor.as_str()))
            .await?;

        match rows.into_iter().find(|r| r.owner == actor.as_str()) {
            Some(row) => Ok(FeeBalance {
                owner: row.owner.clone(),
                balance: parse_xpr(&row.balance)?,
                reserved: parse_xpr(&row.reserved)?,
            }),
            // No row yet means the user never funded a fee balance
            None => Ok(FeeBalance {
                owner: actor.as_str().to_string(),
                balance: 0.0,
                reserved: 0.0,
            }),
        }
    }

    async fn get_bridge_assets(
        &self,
        actor: &Actor,
        bridge_account: &str,
    ) -> Result<Vec<NativeAsset>, RpcError> {
        let rows: Vec<RawAssetRow> = self
            .get_table_rows(actor.as_str(), "assets", None)
            .await?;

        // Only assets minted by the bridge can teleport back out
        Ok(rows
            .into_iter()
            .filter(|row| row.author == bridge_account)
            .map(|row| NativeAsset {
                asset_id: row.asset_id,
                collection_author: row.author,
                token_uri: row.token_uri,
                contract_address_bytes: row.contract_address,
                token_id_bytes: row.token_id,
            })
            .collect())
    }

    async fn list_deposits(&self, owner: &str) -> Result<Vec<DepositRecord>, RpcError> {
        let scope = self.bridge_contract.clone();
        let rows: Vec<RawDepositRow> = self.get_table_rows(&scope, "deposits", None).await?;

        Ok(rows
            .into_iter()
            .filter(|row| row.owner == owner)
            .map(|row| DepositRecord {
                index: row.index,
                owner: row.owner,
                token_contract: row.token_contract,
                token_id: row.token_id,
                receiver: row.to_address,
                claimed: row.claimed,
                created_at: row.created_at,
            })
            .collect())
    }
}

fn parse_fee_row(row: &RawFeeRow) -> Result<FeeQuote, RpcError> {
    Ok(FeeQuote {
        chain_id: row.chain_id,
        port_in_fee: parse_xpr(&row.port_in_fee)?,
        port_out_fee: parse_xpr(&row.port_out_fee)?,
    })
}

/// Parse a chain asset string ("1.2500 XPR") into its decimal amount.
pub fn parse_xpr(asset: &str) -> Result<f64, RpcError> {
    let amount = asset
        .split_whitespace()
        .next()
        .ok_or_else(|| RpcError::ParseError(format!("empty asset string: '{}'", asset)))?;

    amount
        .parse::<f64>()
        .map_err(|e| RpcError::ParseError(format!("bad asset amount '{}': {}", asset, e)))
}
