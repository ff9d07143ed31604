use std::collections::BTreeMap;

/// One account as delivered by the scoring export that seeds the store.
///
/// The export is looser than [`AccountRecord`](super::AccountRecord): counts
/// and area may be missing, the score sits under `probability_isCommercial`,
/// and `consumption` may be partial or absent altogether.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AccountImport {
    pub account_id: i64,
    pub is_commercial: bool,
    pub address: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rooms_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub residents_count: u32,
    /// A missing key means 0; an explicit `null` stays unknown.
    #[cfg_attr(feature = "serde", serde(default = "missing_area"))]
    pub total_area: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "probability_isCommercial", alias = "is_commercial_prob")
    )]
    pub is_commercial_prob: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumption: Option<BTreeMap<u32, f64>>,
}

#[cfg(feature = "serde")]
fn missing_area() -> Option<f64> {
    Some(0.0)
}
