//! Wallet session endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::dto::{ApiError, EthConnectRequest, ProtonConnectRequest, WalletStatusResponse};
use crate::AppState;

/// Create wallet routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/eth/connect", post(connect_eth))
        .route("/eth/disconnect", post(disconnect_eth))
        .route("/proton/connect", post(connect_proton))
        .route("/proton/disconnect", post(disconnect_proton))
}

/// GET /wallet/status - Both wallet sessions at a glance
pub async fn status(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    let eth = state.eth_session().await;
    let proton = state.proton_session().await;

    Json(WalletStatusResponse {
        eth_connected: eth.is_some(),
        eth_address: eth.as_ref().map(|s| s.account.as_str().to_string()),
        chain_id: eth.as_ref().and_then(|s| s.chain_id),
        proton_connected: proton.is_some(),
        proton_actor: proton.map(|s| s.actor.as_str().to_string()),
    })
}

/// POST /wallet/eth/connect - Register the connected EVM wallet
pub async fn connect_eth(
    State(state): State<AppState>,
    Json(request): Json<EthConnectRequest>,
) -> Result<Json<WalletStatusResponse>, (StatusCode, Json<ApiError>)> {
    state
        .connect_eth(request.address, request.chain_id)
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("invalid_address", e.to_string())),
            )
        })?;

    Ok(status(State(state)).await)
}

/// POST /wallet/eth/disconnect
pub async fn disconnect_eth(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    state.disconnect_eth().await;
    status(State(state)).await
}

/// POST /wallet/proton/connect - Sign in a Proton account
pub async fn connect_proton(
    State(state): State<AppState>,
    Json(request): Json<ProtonConnectRequest>,
) -> Result<Json<WalletStatusResponse>, (StatusCode, Json<ApiError>)> {
    state.connect_proton(request.actor).await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("invalid_actor", e.to_string())),
        )
    })?;

    Ok(status(State(state)).await)
}

/// POST /wallet/proton/disconnect
pub async fn disconnect_proton(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    state.disconnect_proton().await;
    status(State(state)).await
}
