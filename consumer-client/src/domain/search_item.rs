use super::AccountRecord;

/// Listing entry shown by the search page: a few display strings derived from
/// the address plus the full account record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub avatar: String,
    pub data: AccountRecord,
}

const ADDRESS_SEPARATOR: &str = ", ";
const TITLE_PARTS: usize = 3;

impl From<AccountRecord> for SearchItem {
    fn from(record: AccountRecord) -> Self {
        let parts: Vec<&str> = record.address.split(ADDRESS_SEPARATOR).collect();

        let title = if parts.len() >= TITLE_PARTS {
            parts[..TITLE_PARTS].join(ADDRESS_SEPARATOR)
        } else {
            record.address.clone()
        };

        let last_part = parts.last().copied().unwrap_or_default();
        let description = format!(
            "{} • {} • {} rooms • {} m²",
            last_part,
            record.building_type,
            record.rooms_count,
            record.total_area.unwrap_or(0.0)
        );

        let avatar = record
            .address
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_else(|| "?".to_string());

        SearchItem {
            id: record.account_id,
            title,
            description,
            avatar,
            data: record,
        }
    }
}
