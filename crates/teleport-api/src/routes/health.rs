//! Bridge health endpoint

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::AppState;

/// GET /health - Report bridge readiness: configured custody account and
/// whether the fee table has been fetched
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let bridge_account = state.config().await.bridge.bridge_account;
    let fees_loaded = state.bridge().await.fees.is_loaded();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        bridge_account,
        fees_loaded,
    })
}
