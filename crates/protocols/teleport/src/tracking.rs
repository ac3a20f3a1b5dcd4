//! Deposit tracking view
//!
//! Read-only projection of the bridge's deposit table for one owner, used by
//! the tracking page to show in-flight and completed teleports.

use chain_clients::ProtonChain;
use serde::{Deserialize, Serialize};

use teleport_core::{DepositRecord, RpcError};

/// One deposit row shaped for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositView {
    pub index: u64,
    pub owner: String,
    pub token_contract: String,
    pub token_id: String,
    pub receiver: String,
    pub status: String,
    pub created_at: u64,
}

impl From<DepositRecord> for DepositView {
    fn from(record: DepositRecord) -> Self {
        let status = if record.claimed {
            "claimed".to_string()
        } else {
            "pending".to_string()
        };
        Self {
            index: record.index,
            owner: record.owner,
            token_contract: record.token_contract,
            token_id: record.token_id,
            receiver: record.receiver,
            status,
            created_at: record.created_at,
        }
    }
}

/// Deposits for one owner, newest first
pub async fn list_deposits(
    chain: &dyn ProtonChain,
    owner: &str,
) -> Result<Vec<DepositView>, RpcError> {
    let mut records = chain.list_deposits(owner).await?;
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(records.into_iter().map(DepositView::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use teleport_core::{Actor, FeeBalance, FeeQuote, NativeAsset};

    struct MockChain(Vec<DepositRecord>);

    #[async_trait]
    impl ProtonChain for MockChain {
        async fn get_teleport_fees(&self) -> Result<Vec<FeeQuote>, RpcError> {
            Ok(vec![])
        }

        async fn get_fees_balance(&self, actor: &Actor) -> Result<FeeBalance, RpcError> {
            Ok(FeeBalance {
                owner: actor.as_str().to_string(),
                balance: 0.0,
                reserved: 0.0,
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
            Ok(self.0.clone())
        }
    }

    fn record(index: u64, claimed: bool, created_at: u64) -> DepositRecord {
        DepositRecord {
            index,
            owner: "alice".to_string(),
            token_contract: "0xabc".to_string(),
            token_id: "7".to_string(),
            receiver: "alice".to_string(),
            claimed,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_deposits_sorted_newest_first_with_status() {
        let chain = MockChain(vec![
            record(1, true, 100),
            record(2, false, 300),
            record(3, false, 200),
        ]);

        let views = list_deposits(&chain, "alice").await.unwrap();
        assert_eq!(
            views.iter().map(|v| v.index).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
        assert_eq!(views[0].status, "pending");
        assert_eq!(views[2].status, "claimed");
    }

    #[tokio::test]
    async fn test_empty_deposit_table() {
        let chain = MockChain(vec![]);
        let views = list_deposits(&chain, "alice").await.unwrap();
        assert!(views.is_empty());
    }
}
