//! HTTP API consumed by the dashboard front end.
//!
//! - `GET /consumers` — paginated search listing
//! - `GET /dashboard/{account_id}` — one account's search item
//! - `GET /dashboard/{account_id}/metrics` — derived dashboard metrics

mod error;
mod handlers;

pub use error::ApiError;

use std::{net::SocketAddr, sync::Arc};

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::PaginationConfig;
use crate::store::AccountStore;

/// Shared, read-only state for the request handlers.
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub pagination: PaginationConfig,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/consumers", get(handlers::list_consumers))
        .route("/consumers/", get(handlers::list_consumers))
        .route("/dashboard/:account_id", get(handlers::get_consumer))
        .route("/dashboard/:account_id/metrics", get(handlers::get_dashboard_metrics))
        .with_state(state)
}

/// CORS policy letting the configured dashboard origins read the API.
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("invalid CORS origin '{o}': {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET]))
}

pub async fn serve(app: Router, bind_addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid http.bind_addr: {e}"))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashboard API listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
