//! Teleport API server setup
//!
//! Builds the bridge router with CORS and request tracing, and binds to the
//! host and port from [`AppConfig`].

use axum::Router;
use teleport_core::AppConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::create_router;
use crate::AppState;

/// Assemble the bridge API router with middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn bind_addr(config: &AppConfig) -> String {
    format!("{}:{}", config.api_host, config.api_port)
}

/// Serve the bridge API on the configured address
pub async fn start_server(state: AppState) -> Result<(), std::io::Error> {
    let addr = bind_addr(&state.config().await);
    let app = create_app(state);

    tracing::info!("Teleport bridge API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
