//! Account stores: where the dashboard reads account records from.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;

use consumer_client::AccountRecord;

use crate::config::PaginationConfig;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("fixture error: {0}")]
    Fixture(String),
    #[error("invalid page request: {0}")]
    InvalidPage(String),
}

/// A validated page of the account listing. Pages are 1-based.
///
/// Only [`PageRequest::new`] builds one outside this module, so `page >= 1`
/// and `per_page >= 1` hold for every value a store receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub fn new(
        page: Option<u32>,
        per_page: Option<u32>,
        limits: &PaginationConfig,
    ) -> Result<Self, StoreError> {
        let page = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(limits.default_per_page);

        if page == 0 {
            return Err(StoreError::InvalidPage("page must be >= 1".to_string()));
        }
        if per_page == 0 || per_page > limits.max_per_page {
            return Err(StoreError::InvalidPage(format!(
                "per_page must be within 1..={}",
                limits.max_per_page
            )));
        }

        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

/// Read access to account records.
///
/// Listings are ordered by `is_commercial_prob` descending, then by account id.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Vec<AccountRecord>, StoreError>;

    async fn get(&self, account_id: i64) -> Result<Option<AccountRecord>, StoreError>;
}
