use consumer_client::{db::account_queries, AccountRecord};
use sqlx::PgPool;

use super::{AccountStore, PageRequest, StoreError};

/// Accounts read from the relational store over the Postgres wire protocol.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<AccountRecord>, StoreError> {
        let offset = i64::try_from(page.offset())
            .map_err(|_| StoreError::InvalidPage("page offset too large".to_string()))?;

        account_queries::list_accounts(&self.pool, i64::from(page.per_page()), offset)
            .await
            .map_err(|e| {
                metrics::counter!("account_store_errors_total").increment(1);
                StoreError::Database(format!("{e:#}"))
            })
    }

    async fn get(&self, account_id: i64) -> Result<Option<AccountRecord>, StoreError> {
        account_queries::fetch_account(&self.pool, account_id)
            .await
            .map_err(|e| {
                metrics::counter!("account_store_errors_total").increment(1);
                StoreError::Database(format!("{e:#}"))
            })
    }
}
