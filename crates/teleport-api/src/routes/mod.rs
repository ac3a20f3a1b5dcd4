//! API route handlers

pub mod bridge;
pub mod health;
pub mod tracking;
pub mod wallet;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/wallet", wallet::router())
        .nest("/bridge", bridge::router())
        .nest("/tracking", tracking::router())
        .with_state(state)
}
