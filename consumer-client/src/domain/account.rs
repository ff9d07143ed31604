use std::collections::BTreeMap;

/// One utility account as held by the account store.
///
/// `consumption` is kept exactly as received (month number to kWh). It is not
/// checked for completeness here; the dashboard engine validates it before
/// deriving anything from it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AccountRecord {
    pub account_id: i64,
    pub is_commercial: bool,
    pub address: String,
    pub building_type: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rooms_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub residents_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_area: Option<f64>,
    pub consumption: BTreeMap<u32, f64>,
    #[cfg_attr(feature = "serde", serde(rename = "is_commercial_prob"))]
    pub is_commercial_prob: f64,
}
