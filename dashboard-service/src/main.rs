use std::sync::Arc;

use anyhow::Result;
use dashboard_service::{
    api::{self, AppState},
    config::{AppConfig, StoreKind},
    metrics_server, observability,
    store::{AccountStore, MemoryAccountStore, PgAccountStore},
};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing()?;

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr).await?;
    }

    let store: Arc<dyn AccountStore> = match cfg.store.kind {
        StoreKind::Pgwire => {
            let db = cfg
                .database
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("pgwire store needs a [database] section"))?;
            let pool = PgPoolOptions::new()
                .max_connections(db.max_connections)
                .connect(&db.uri)
                .await?;
            Arc::new(PgAccountStore::new(pool))
        }
        StoreKind::JsonFile => {
            let path = cfg
                .store
                .path
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("json_file store needs store.path"))?;
            Arc::new(MemoryAccountStore::from_json_file(path).await?)
        }
    };

    let state = Arc::new(AppState {
        store,
        pagination: cfg.pagination,
    });
    let app = api::router(state).layer(api::cors_layer(&cfg.http.cors_origins)?);

    api::serve(app, &cfg.http.bind_addr).await
}
