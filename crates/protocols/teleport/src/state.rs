//! Serializable state types for frontend communication

use serde::{Deserialize, Serialize};

use teleport_core::{format_xpr, ChainAsset, TokenKind, TransferDirection};

use crate::fee::FeeTable;

/// Claim-confirmation prompt opened after a confirmed lock.
///
/// Carries everything the destination-chain claim step needs. For
/// Proton-origin assets the contract and token id are the raw on-chain byte
/// arrays rendered as `0x`-prefixed hex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPrompt {
    pub eth_to_proton: bool,
    pub token_contract: String,
    pub token_id: String,
    /// Set for Proton-origin assets only
    pub asset_id: Option<String>,
    pub receiver: String,
    pub created_at: u64,
}

/// Fee panel info for the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeInfo {
    /// Fee row chain id (-1 = fees unavailable)
    pub chain_id: i64,
    /// Applicable fee for the active direction (4-decimal display)
    pub fee: String,
    pub fee_raw: f64,
    /// Available fee balance (4-decimal display); absent until a user
    /// identity is known
    pub fee_balance: Option<String>,
    pub fee_balance_raw: Option<f64>,
}

impl FeeInfo {
    pub fn from_table(
        table: &FeeTable,
        chain_id: Option<i64>,
        direction: TransferDirection,
    ) -> Self {
        let quote = table.resolve_fee(chain_id);
        let fee = quote.fee_for(direction);
        let available = table.snapshot().map(|s| s.available());

        Self {
            chain_id: quote.chain_id,
            fee: format_xpr(fee),
            fee_raw: fee,
            fee_balance: available.map(format_xpr),
            fee_balance_raw: available,
        }
    }
}

/// Overall bridge state sent to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeleportState {
    pub direction: TransferDirection,
    pub active_kind: TokenKind,
    pub fees: FeeInfo,
    pub staged: Vec<ChainAsset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use teleport_core::{FeeBalance, FeeQuote};

    #[test]
    fn test_fee_info_display_precision() {
        let table = FeeTable::with_data(
            vec![FeeQuote {
                chain_id: 137,
                port_in_fee: 2.00009,
                port_out_fee: 3.0,
            }],
            Some(FeeBalance {
                owner: "alice".to_string(),
                balance: 5.5,
                reserved: 0.25,
            }),
        );

        let info = FeeInfo::from_table(&table, Some(137), TransferDirection::EthToProton);
        assert_eq!(info.fee, "2.0001");
        // Raw value stays unrounded for comparisons
        assert_eq!(info.fee_raw, 2.00009);
        assert_eq!(info.fee_balance.as_deref(), Some("5.2500"));
    }

    #[test]
    fn test_fee_info_without_snapshot() {
        let table = FeeTable::new();
        let info = FeeInfo::from_table(&table, None, TransferDirection::ProtonToEth);
        assert_eq!(info.chain_id, -1);
        assert!(info.fee_balance.is_none());
    }

    #[test]
    fn test_claim_prompt_serde_shape() {
        let prompt = ClaimPrompt {
            eth_to_proton: false,
            token_contract: "0xab01".to_string(),
            token_id: "0x0f".to_string(),
            asset_id: Some("42".to_string()),
            receiver: "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD08".to_string(),
            created_at: 1,
        };
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(json["ethToProton"], false);
        assert_eq!(json["tokenContract"], "0xab01");
    }
}
