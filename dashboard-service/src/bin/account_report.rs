use anyhow::{bail, Result};
use dashboard_service::{compute_dashboard, observability, store::MemoryAccountStore};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: account_report <accounts_json_path>");
    }
    let file_path = &args[1];

    let contents = tokio::fs::read_to_string(file_path).await?;
    let records = MemoryAccountStore::parse_records(&contents)?;

    let mut blocked = 0usize;
    for record in &records {
        match compute_dashboard(record) {
            Ok(metrics) => println!("{metrics}\n"),
            Err(e) => {
                blocked += 1;
                tracing::warn!(account_id = record.account_id, error = %e, "metrics blocked");
            }
        }
    }

    tracing::info!(accounts = records.len(), blocked, "account report complete");
    Ok(())
}
