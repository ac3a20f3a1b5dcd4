//! Deposit tracking endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::dto::{ApiError, DepositsResponse};
use crate::AppState;

/// Create tracking routes
pub fn router() -> Router<AppState> {
    Router::new().route("/deposits", get(deposits))
}

#[derive(Debug, Deserialize)]
pub struct DepositsQuery {
    pub owner: String,
}

/// GET /tracking/deposits?owner= - Pending and claimed teleports for an owner
pub async fn deposits(
    State(state): State<AppState>,
    Query(query): Query<DepositsQuery>,
) -> Result<Json<DepositsResponse>, (StatusCode, Json<ApiError>)> {
    if query.owner.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request("owner must not be empty")),
        ));
    }

    let deposits = teleport::list_deposits(state.chain(), query.owner.trim())
        .await
        .map_err(|e| {
            tracing::warn!("Deposit lookup failed for {}: {}", query.owner, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiError::upstream(e.to_string())),
            )
        })?;

    let count = deposits.len();
    Ok(Json(DepositsResponse { deposits, count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chain_clients::{BridgeOracle, ProtonChain};
    use std::sync::Arc;
    use teleport_core::{
        Actor, AppConfig, DepositRecord, FeeBalance, FeeQuote, NativeAsset, RpcError,
    };

    struct StubChain;

    #[async_trait]
    impl ProtonChain for StubChain {
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

        async fn list_deposits(&self, owner: &str) -> Result<Vec<DepositRecord>, RpcError> {
            Ok(vec![DepositRecord {
                index: 1,
                owner: owner.to_string(),
                token_contract: "0xabc".to_string(),
                token_id: "7".to_string(),
                receiver: owner.to_string(),
                claimed: false,
                created_at: 10,
            }])
        }
    }

    struct StubOracle;

    #[async_trait]
    impl BridgeOracle for StubOracle {
        async fn is_up(&self) -> bool {
            true
        }
    }

    fn app_state() -> AppState {
        AppState::new(AppConfig::default(), Arc::new(StubChain), Arc::new(StubOracle))
    }

    #[tokio::test]
    async fn test_deposits_for_owner() {
        let state = app_state();
        let response = deposits(
            State(state),
            Query(DepositsQuery {
                owner: "alice".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.count, 1);
        assert_eq!(response.deposits[0].status, "pending");
    }

    #[tokio::test]
    async fn test_blank_owner_rejected() {
        let state = app_state();
        let result = deposits(
            State(state),
            Query(DepositsQuery {
                owner: "  ".to_string(),
            }),
        )
        .await;

        let (code, _) = result.err().unwrap();
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }
}
