//! Bridge endpoints: state, selection, transfers and fee balance

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use chain_clients::{EvmBridge, TeleportSigner};
use teleport::{
    Collaborators, FeeInfo, TeleportState, TransferContext, TransferOutcome,
};
use teleport_core::{
    Actor, ChainAsset, EvmAddress, EvmAsset, RpcError, TransferDirection, TxError,
};

use crate::dto::{
    ApiError, AssetDto, AssetsResponse, BridgeStateResponse, ClearSelectionRequest,
    DirectionRequest, FeeBalanceResponse, KindRequest, SelectionRequest, TransferRequest,
    TransferResponse, WithdrawRequest,
};
use crate::state::{BridgeSession, RequestNotices};
use crate::AppState;

/// Create bridge routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/assets", get(list_assets))
        .route("/direction", post(set_direction))
        .route("/kind", post(set_kind))
        .route("/selection", post(set_selection).delete(clear_selection))
        .route("/transfer", post(transfer))
        .route("/topup", post(top_up))
        .route("/withdraw", post(withdraw))
}

fn state_response(
    session: &BridgeSession,
    chain_id: Option<i64>,
    claim_prompt: Option<teleport::ClaimPrompt>,
) -> BridgeStateResponse {
    BridgeStateResponse {
        state: TeleportState {
            direction: session.direction,
            active_kind: session.selection.active_kind(session.direction),
            fees: FeeInfo::from_table(&session.fees, chain_id, session.direction),
            staged: session.selection.staged(session.direction).to_vec(),
        },
        claim_prompt,
    }
}

/// GET /bridge/state - Direction, fees, staged selection and any pending
/// claim prompt (the prompt is delivered at most once)
pub async fn get_state(State(state): State<AppState>) -> Json<BridgeStateResponse> {
    state.ensure_fees_loaded().await;
    let chain_id = state.eth_session().await.and_then(|s| s.chain_id);
    let claim = state.claim_inbox().take();
    let session = state.bridge().await;
    Json(state_response(&session, chain_id, claim))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetSide {
    Eth,
    Proton,
}

#[derive(Debug, Deserialize)]
pub struct AssetsQuery {
    pub side: AssetSide,
}

/// GET /bridge/assets?side= - The signed-in user's teleportable assets on
/// one side of the bridge, with display metadata where resolvable
pub async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<AssetsQuery>,
) -> Result<Json<AssetsResponse>, (StatusCode, Json<ApiError>)> {
    let assets: Vec<ChainAsset> = match query.side {
        AssetSide::Proton => {
            let actor = state
                .proton_session()
                .await
                .map(|s| s.actor)
                .ok_or_else(|| {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(ApiError::new(
                            "wallet_not_connected",
                            "Sign in with your Proton account first",
                        )),
                    )
                })?;
            let config = state.config().await;
            let assets = state
                .chain()
                .get_bridge_assets(&actor, &config.bridge.bridge_account)
                .await
                .map_err(upstream)?;

            // The fee-balance snapshot refreshes together with the inventory
            let mut session = state.bridge().await;
            session.fees.refresh_balance(state.chain(), &actor).await;

            assets.into_iter().map(ChainAsset::Native).collect()
        }
        AssetSide::Eth => {
            let session = state.eth_session().await.ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ApiError::new(
                        "wallet_not_connected",
                        "Connect your ethereum wallet first",
                    )),
                )
            })?;
            let evm = state.evm_bridge().await.ok_or_else(|| {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ApiError::signer_unavailable("ethereum")),
                )
            })?;
            evm.get_nfts(&session.account)
                .await
                .map_err(upstream)?
                .into_iter()
                .map(ChainAsset::Evm)
                .collect()
        }
    };

    let mut out = Vec::with_capacity(assets.len());
    for asset in assets {
        let metadata = match asset.metadata_uri() {
            Some(uri) => state.metadata().resolve(uri).await,
            None => None,
        };
        out.push(AssetDto { asset, metadata });
    }

    let count = out.len();
    Ok(Json(AssetsResponse { assets: out, count }))
}

fn upstream(e: RpcError) -> (StatusCode, Json<ApiError>) {
    tracing::warn!("Asset inventory fetch failed: {}", e);
    (StatusCode::BAD_GATEWAY, Json(ApiError::upstream(e.to_string())))
}

/// POST /bridge/direction - Switch the active transfer direction
pub async fn set_direction(
    State(state): State<AppState>,
    Json(request): Json<DirectionRequest>,
) -> Json<BridgeStateResponse> {
    let chain_id = state.eth_session().await.and_then(|s| s.chain_id);
    let mut session = state.bridge().await;
    session.direction = request.direction;
    Json(state_response(&session, chain_id, None))
}

/// POST /bridge/kind - Switch the token-kind filter for a direction
pub async fn set_kind(
    State(state): State<AppState>,
    Json(request): Json<KindRequest>,
) -> Json<BridgeStateResponse> {
    let chain_id = state.eth_session().await.and_then(|s| s.chain_id);
    let mut session = state.bridge().await;
    session.selection.set_kind(request.direction, request.kind);
    Json(state_response(&session, chain_id, None))
}

/// POST /bridge/selection - Replace the staged selection for a direction.
/// An empty asset list is rejected; use DELETE to clear.
pub async fn set_selection(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<BridgeStateResponse>, (StatusCode, Json<ApiError>)> {
    let chain_id = state.eth_session().await.and_then(|s| s.chain_id);
    let mut session = state.bridge().await;

    if !session
        .selection
        .set_selection(request.direction, request.assets)
    {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(
                "Selection must not be empty; use DELETE /bridge/selection to clear",
            )),
        ));
    }

    Ok(Json(state_response(&session, chain_id, None)))
}

/// DELETE /bridge/selection - Clear the staged selection for a direction
pub async fn clear_selection(
    State(state): State<AppState>,
    Json(request): Json<ClearSelectionRequest>,
) -> Json<BridgeStateResponse> {
    let chain_id = state.eth_session().await.and_then(|s| s.chain_id);
    let mut session = state.bridge().await;
    session.selection.clear(request.direction);
    Json(state_response(&session, chain_id, None))
}

/// POST /bridge/transfer - Attempt a teleport for the active direction
pub async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, (StatusCode, Json<ApiError>)> {
    state.ensure_fees_loaded().await;

    let eth = state.eth_session().await;
    let proton = state.proton_session().await;
    let evm = state.evm_bridge().await;
    let signer = state.signer().await;

    let mut session = state.bridge().await;
    let direction = session.direction;

    // The lock transaction is signed outside this process; without an
    // injected backend for the source chain the transfer cannot start.
    match direction {
        TransferDirection::EthToProton if evm.is_none() => {
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiError::signer_unavailable("ethereum")),
            ));
        }
        TransferDirection::ProtonToEth if signer.is_none() => {
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiError::signer_unavailable("proton")),
            ));
        }
        _ => {}
    }

    let notices = RequestNotices::new();
    let claims: std::sync::Arc<dyn teleport::ClaimSink> = state.claim_inbox();

    let ctx = TransferContext {
        direction,
        eth_account: eth.as_ref().map(|s| &s.account),
        chain_id: eth.as_ref().and_then(|s| s.chain_id),
        proton_actor: proton.as_ref().map(|s| &s.actor),
        manual_receiver: request.receiver.as_deref(),
    };

    let outcome = {
        let BridgeSession {
            director,
            selection,
            fees,
            ..
        } = &mut *session;

        let collab = Collaborators {
            oracle: state.oracle(),
            evm: evm.as_deref().unwrap_or(&NoEvmBackend),
            signer: signer.as_deref().unwrap_or(&NoProtonBackend),
            notifier: &notices,
            claims,
        };

        director
            .initiate_transfer(&ctx, selection, fees, &collab)
            .await
    };

    let response = match outcome {
        TransferOutcome::Blocked => TransferResponse {
            status: "blocked".to_string(),
            claim: None,
            required: None,
            available: None,
            notices: notices.into_vec(),
        },
        TransferOutcome::TopUpRequired {
            required,
            available,
        } => TransferResponse {
            status: "topUpRequired".to_string(),
            claim: None,
            required: Some(required),
            available: Some(available),
            notices: notices.into_vec(),
        },
        TransferOutcome::LockConfirmed(claim) => {
            // The locked asset has left the user's wallet
            session.selection.clear(direction);
            TransferResponse {
                status: "locked".to_string(),
                claim: Some(claim),
                required: None,
                available: None,
                notices: notices.into_vec(),
            }
        }
    };

    Ok(Json(response))
}

/// POST /bridge/topup - Deposit the fixed top-up amount into the fee balance
pub async fn top_up(
    State(state): State<AppState>,
) -> Result<Json<FeeBalanceResponse>, (StatusCode, Json<ApiError>)> {
    let (signer, actor) = fee_balance_prerequisites(&state).await?;
    let chain_id = state.eth_session().await.and_then(|s| s.chain_id);

    let notices = RequestNotices::new();
    let mut session = state.bridge().await;
    let success = teleport::top_up(
        &actor,
        &mut session.fees,
        state.chain(),
        signer.as_ref(),
        &notices,
    )
    .await;

    Ok(Json(FeeBalanceResponse {
        success,
        fees: FeeInfo::from_table(&session.fees, chain_id, session.direction),
        notices: notices.into_vec(),
    }))
}

/// POST /bridge/withdraw - Withdraw XPR from the fee balance
pub async fn withdraw(
    State(state): State<AppState>,
    Json(request): Json<WithdrawRequest>,
) -> Result<Json<FeeBalanceResponse>, (StatusCode, Json<ApiError>)> {
    let (signer, actor) = fee_balance_prerequisites(&state).await?;
    let chain_id = state.eth_session().await.and_then(|s| s.chain_id);

    let notices = RequestNotices::new();
    let mut session = state.bridge().await;
    let success = teleport::withdraw(
        &actor,
        request.amount,
        &mut session.fees,
        state.chain(),
        signer.as_ref(),
        &notices,
    )
    .await;

    Ok(Json(FeeBalanceResponse {
        success,
        fees: FeeInfo::from_table(&session.fees, chain_id, session.direction),
        notices: notices.into_vec(),
    }))
}

async fn fee_balance_prerequisites(
    state: &AppState,
) -> Result<(std::sync::Arc<dyn TeleportSigner>, Actor), (StatusCode, Json<ApiError>)> {
    let signer = state.signer().await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::signer_unavailable("proton")),
        )
    })?;

    let actor = state
        .proton_session()
        .await
        .map(|s| s.actor)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiError::new(
                    "wallet_not_connected",
                    "Sign in with your Proton account first",
                )),
            )
        })?;

    Ok((signer, actor))
}

/// Placeholder backend for the direction that is not being transferred;
/// the director never calls it for that direction.
struct NoEvmBackend;

#[async_trait]
impl EvmBridge for NoEvmBackend {
    async fn get_nfts(&self, _account: &EvmAddress) -> Result<Vec<EvmAsset>, RpcError> {
        Err(RpcError::ApiError {
            message: "no EVM signing backend".to_string(),
        })
    }

    async fn lock_erc721(
        &self,
        _contract: &str,
        _token_id: &str,
        _owner: &EvmAddress,
    ) -> Result<(), TxError> {
        Err(TxError::Rpc {
            message: "no EVM signing backend".to_string(),
        })
    }

    async fn lock_erc1155(
        &self,
        _contract: &str,
        _token_id: &str,
        _owner: &EvmAddress,
        _amount: u64,
    ) -> Result<(), TxError> {
        Err(TxError::Rpc {
            message: "no EVM signing backend".to_string(),
        })
    }
}

struct NoProtonBackend;

#[async_trait]
impl TeleportSigner for NoProtonBackend {
    async fn transfer_to_bridge(
        &self,
        _sender: &Actor,
        _recipient: &str,
        _asset_ids: &[String],
        _memo: &str,
    ) -> Result<(), TxError> {
        Err(TxError::Rpc {
            message: "no Proton signing backend".to_string(),
        })
    }

    async fn deposit_fee(&self, _actor: &Actor, _amount: f64) -> Result<(), TxError> {
        Err(TxError::Rpc {
            message: "no Proton signing backend".to_string(),
        })
    }

    async fn withdraw_fee(&self, _actor: &Actor, _amount: f64) -> Result<(), TxError> {
        Err(TxError::Rpc {
            message: "no Proton signing backend".to_string(),
        })
    }
}
