use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};

/// Full application router with the API nested under `/api`
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::router(Arc::new(state)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve `state` on `bind` until the process stops
pub async fn run(state: AppState, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    tracing::info!("Web server running at http://{bind}");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
