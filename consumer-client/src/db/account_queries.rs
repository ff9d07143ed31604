use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::domain::{AccountImport, AccountRecord};

pub const COMMERCIAL_BUILDING: &str = "Commercial";
pub const PRIVATE_BUILDING: &str = "Private";

/// One row of `electricity_consumers`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConsumerRow {
    pub account_id: i64,
    pub is_commercial: bool,
    pub address: String,
    pub building_type: String,
    pub rooms_count: i32,
    pub residents_count: i32,
    pub total_area: Option<f64>,
    pub is_commercial_prob: f64,
}

/// One row of `monthly_consumption`, unique per `(account_id, month)`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyConsumptionRow {
    pub account_id: i64,
    pub month: i32,
    pub value: f64,
}

/// Fetch one page of accounts, most likely commercial first.
pub async fn list_accounts(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<AccountRecord>> {
    let consumers = sqlx::query_as::<_, ConsumerRow>(
        r#"
        SELECT
            account_id,
            is_commercial,
            address,
            building_type,
            rooms_count,
            residents_count,
            total_area,
            is_commercial_prob
        FROM electricity_consumers
        ORDER BY is_commercial_prob DESC, account_id
        LIMIT $1
        OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    if consumers.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = consumers.iter().map(|c| c.account_id).collect();
    let months = sqlx::query_as::<_, MonthlyConsumptionRow>(
        r#"
        SELECT account_id, month, value
        FROM monthly_consumption
        WHERE account_id = ANY($1)
        ORDER BY account_id, month
        "#,
    )
    .bind(ids.as_slice())
    .fetch_all(pool)
    .await?;

    assemble_records(consumers, months)
}

/// Fetch a single account with its monthly consumption.
pub async fn fetch_account(pool: &PgPool, account_id: i64) -> Result<Option<AccountRecord>> {
    let consumer = sqlx::query_as::<_, ConsumerRow>(
        r#"
        SELECT
            account_id,
            is_commercial,
            address,
            building_type,
            rooms_count,
            residents_count,
            total_area,
            is_commercial_prob
        FROM electricity_consumers
        WHERE account_id = $1
        "#,
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    let Some(consumer) = consumer else {
        return Ok(None);
    };

    let months = sqlx::query_as::<_, MonthlyConsumptionRow>(
        r#"
        SELECT account_id, month, value
        FROM monthly_consumption
        WHERE account_id = $1
        ORDER BY month
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    let mut records = assemble_records(vec![consumer], months)?;
    Ok(records.pop())
}

/// Join consumer rows with their monthly rows, keeping the consumer order.
pub fn assemble_records(
    consumers: Vec<ConsumerRow>,
    months: Vec<MonthlyConsumptionRow>,
) -> Result<Vec<AccountRecord>> {
    let mut by_account: HashMap<i64, BTreeMap<u32, f64>> = HashMap::new();
    for row in months {
        let month = u32::try_from(row.month)
            .with_context(|| format!("account {}: invalid month {}", row.account_id, row.month))?;
        by_account
            .entry(row.account_id)
            .or_default()
            .insert(month, row.value);
    }

    consumers
        .into_iter()
        .map(|c| {
            let rooms_count = u32::try_from(c.rooms_count)
                .with_context(|| format!("account {}: negative rooms_count", c.account_id))?;
            let residents_count = u32::try_from(c.residents_count)
                .with_context(|| format!("account {}: negative residents_count", c.account_id))?;

            Ok(AccountRecord {
                consumption: by_account.remove(&c.account_id).unwrap_or_default(),
                account_id: c.account_id,
                is_commercial: c.is_commercial,
                address: c.address,
                building_type: c.building_type,
                rooms_count,
                residents_count,
                total_area: c.total_area,
                is_commercial_prob: c.is_commercial_prob,
            })
        })
        .collect()
}

/// Rows written for one imported account.
///
/// The building type follows the commercial flag. When the import carries
/// consumption, all twelve months are written and absent months become 0;
/// without consumption no monthly rows are produced.
pub fn import_rows(import: &AccountImport) -> Result<(ConsumerRow, Vec<MonthlyConsumptionRow>)> {
    let rooms_count = i32::try_from(import.rooms_count)
        .with_context(|| format!("account {}: rooms_count out of range", import.account_id))?;
    let residents_count = i32::try_from(import.residents_count)
        .with_context(|| format!("account {}: residents_count out of range", import.account_id))?;

    let consumer = ConsumerRow {
        account_id: import.account_id,
        is_commercial: import.is_commercial,
        address: import.address.clone(),
        building_type: if import.is_commercial {
            COMMERCIAL_BUILDING
        } else {
            PRIVATE_BUILDING
        }
        .to_string(),
        rooms_count,
        residents_count,
        total_area: import.total_area,
        is_commercial_prob: import.is_commercial_prob,
    };

    let months = match &import.consumption {
        Some(consumption) => (1..=12_u32)
            .map(|month| MonthlyConsumptionRow {
                account_id: import.account_id,
                month: month as i32,
                value: consumption.get(&month).copied().unwrap_or(0.0),
            })
            .collect(),
        None => Vec::new(),
    };

    Ok((consumer, months))
}

/// Insert or update one account and its monthly rows in a single transaction.
///
/// An existing account keeps its `building_type`; every other column is
/// overwritten.
pub async fn upsert_account(
    pool: &PgPool,
    consumer: &ConsumerRow,
    months: &[MonthlyConsumptionRow],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO electricity_consumers (
            account_id,
            is_commercial,
            address,
            building_type,
            rooms_count,
            residents_count,
            total_area,
            is_commercial_prob
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (account_id) DO UPDATE SET
            is_commercial = EXCLUDED.is_commercial,
            address = EXCLUDED.address,
            rooms_count = EXCLUDED.rooms_count,
            residents_count = EXCLUDED.residents_count,
            total_area = EXCLUDED.total_area,
            is_commercial_prob = EXCLUDED.is_commercial_prob
        "#,
    )
    .bind(consumer.account_id)
    .bind(consumer.is_commercial)
    .bind(&consumer.address)
    .bind(&consumer.building_type)
    .bind(consumer.rooms_count)
    .bind(consumer.residents_count)
    .bind(consumer.total_area)
    .bind(consumer.is_commercial_prob)
    .execute(&mut *tx)
    .await
    .with_context(|| format!("upserting account {}", consumer.account_id))?;

    for row in months {
        sqlx::query(
            r#"
            INSERT INTO monthly_consumption (account_id, month, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id, month) DO UPDATE SET
                value = EXCLUDED.value
            "#,
        )
        .bind(row.account_id)
        .bind(row.month)
        .bind(row.value)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("upserting account {} month {}", row.account_id, row.month))?;
    }

    tx.commit().await?;
    Ok(())
}
