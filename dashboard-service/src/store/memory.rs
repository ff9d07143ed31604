use std::{collections::HashSet, path::Path};

use consumer_client::AccountRecord;

use super::{AccountStore, PageRequest, StoreError};

/// Accounts held in memory, typically loaded once from a JSON fixture file
/// containing an array of account records.
pub struct MemoryAccountStore {
    /// Already in listing order.
    records: Vec<AccountRecord>,
}

impl MemoryAccountStore {
    pub fn new(records: Vec<AccountRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut records: Vec<AccountRecord> = records
            .into_iter()
            .filter(|r| {
                let fresh = seen.insert(r.account_id);
                if !fresh {
                    tracing::warn!(account_id = r.account_id, "duplicate account in fixture; keeping first");
                }
                fresh
            })
            .collect();

        records.sort_by(|a, b| {
            b.is_commercial_prob
                .total_cmp(&a.is_commercial_prob)
                .then(a.account_id.cmp(&b.account_id))
        });

        Self { records }
    }

    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Fixture(format!("failed to read {}: {e}", path.display())))?;
        let records = Self::parse_records(&contents)?;

        tracing::info!(path = %path.display(), accounts = records.len(), "loaded account fixture");
        Ok(Self::new(records))
    }

    pub fn parse_records(contents: &str) -> Result<Vec<AccountRecord>, StoreError> {
        serde_json::from_str(contents)
            .map_err(|e| StoreError::Fixture(format!("invalid account fixture: {e}")))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl AccountStore for MemoryAccountStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<AccountRecord>, StoreError> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(self
            .records
            .iter()
            .skip(offset)
            .take(page.per_page() as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, account_id: i64) -> Result<Option<AccountRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .find(|r| r.account_id == account_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn account(account_id: i64, prob: f64) -> AccountRecord {
        AccountRecord {
            account_id,
            is_commercial: prob > 0.5,
            address: format!("Street {account_id}"),
            building_type: "Private".to_string(),
            rooms_count: 1,
            residents_count: 1,
            total_area: None,
            consumption: BTreeMap::new(),
            is_commercial_prob: prob,
        }
    }

    fn page(page: u32, per_page: u32) -> PageRequest {
        PageRequest { page, per_page }
    }

    #[tokio::test]
    async fn lists_most_likely_commercial_first() {
        let store = MemoryAccountStore::new(vec![
            account(1, 0.2),
            account(2, 0.9),
            account(3, 0.5),
            account(4, 0.9),
        ]);

        let ids: Vec<i64> = store
            .list(page(1, 10))
            .await
            .unwrap()
            .iter()
            .map(|r| r.account_id)
            .collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[tokio::test]
    async fn pages_past_the_end_are_empty() {
        let store = MemoryAccountStore::new(vec![account(1, 0.2), account(2, 0.3), account(3, 0.4)]);

        let second: Vec<i64> = store
            .list(page(2, 2))
            .await
            .unwrap()
            .iter()
            .map(|r| r.account_id)
            .collect();
        assert_eq!(second, vec![1]);
        assert!(store.list(page(5, 2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_finds_by_account_id() {
        let store = MemoryAccountStore::new(vec![account(10, 0.2), account(10, 0.8), account(11, 0.1)]);

        assert_eq!(store.len(), 2);
        let found = store.get(10).await.unwrap().unwrap();
        assert_eq!(found.is_commercial_prob, 0.2);
        assert!(store.get(99).await.unwrap().is_none());
    }

    #[test]
    fn malformed_fixture_is_a_fixture_error() {
        let res = MemoryAccountStore::parse_records("{not json");
        assert!(matches!(res, Err(StoreError::Fixture(_))));
    }
}
