use anyhow::{bail, Context, Result};
use consumer_client::{db::account_queries, AccountImport};
use dashboard_service::{config::AppConfig, observability};
use sqlx::postgres::PgPoolOptions;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: load_accounts <scored_accounts_json_path>");
    }
    let file_path = &args[1];

    // Same config file as the service; only the [database] section is used.
    let cfg = AppConfig::load()?;
    let Some(db) = cfg.database.as_ref() else {
        bail!("load_accounts needs a [database] section");
    };

    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .connect(&db.uri)
        .await?;

    let contents = tokio::fs::read_to_string(file_path)
        .await
        .with_context(|| format!("reading {file_path}"))?;
    let imports: Vec<AccountImport> =
        serde_json::from_str(&contents).with_context(|| format!("parsing {file_path}"))?;

    let mut months_written = 0usize;
    for import in &imports {
        let (consumer, months) = account_queries::import_rows(import)?;
        account_queries::upsert_account(&pool, &consumer, &months).await?;
        months_written += months.len();
        tracing::debug!(account_id = import.account_id, months = months.len(), "account loaded");
    }

    tracing::info!(
        accounts = imports.len(),
        months = months_written,
        file = %file_path,
        "account load complete"
    );
    Ok(())
}
