use std::collections::BTreeMap;

use super::MetricsError;

pub const MONTHS_PER_YEAR: usize = 12;

/// Upper bound on a year's total consumption. Far above any real meter, and low
/// enough that every weighted or percentage figure derived from the total stays
/// finite.
pub const MAX_YEARLY_TOTAL: f64 = 1e300;

const MONTH_LABELS: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short display label for a month number in `1..=12`.
pub fn month_label(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_LABELS[month as usize - 1],
        _ => "?",
    }
}

/// Twelve monthly consumption readings, validated once at construction.
///
/// Month `m` is stored at index `m - 1`, so iteration is always in calendar
/// order regardless of how the readings arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionSeries {
    values: [f64; MONTHS_PER_YEAR],
}

impl ConsumptionSeries {
    /// Builds a series from the month-keyed map carried by an account record.
    ///
    /// The map must hold exactly the months 1 through 12, each with a finite,
    /// non-negative reading.
    pub fn from_months(months: &BTreeMap<u32, f64>) -> Result<Self, MetricsError> {
        if months.len() != MONTHS_PER_YEAR {
            return Err(MetricsError::InvalidSeries(format!(
                "expected {MONTHS_PER_YEAR} monthly readings, got {}",
                months.len()
            )));
        }

        let mut values = [0.0; MONTHS_PER_YEAR];
        for (&month, &value) in months {
            if !(1..=MONTHS_PER_YEAR as u32).contains(&month) {
                return Err(MetricsError::InvalidSeries(format!(
                    "month {month} is outside 1..=12"
                )));
            }
            values[month as usize - 1] = value;
        }

        Self::from_values(values)
    }

    /// Builds a series from readings already in calendar order.
    ///
    /// Individually finite readings can still overflow when added up, so the
    /// total is bounded by [`MAX_YEARLY_TOTAL`] as well.
    pub fn from_values(values: [f64; MONTHS_PER_YEAR]) -> Result<Self, MetricsError> {
        for (idx, value) in values.iter().enumerate() {
            if !value.is_finite() || *value < 0.0 {
                return Err(MetricsError::InvalidSeries(format!(
                    "month {} has invalid reading {value}",
                    idx + 1
                )));
            }
        }

        let total: f64 = values.iter().sum();
        if total > MAX_YEARLY_TOTAL {
            return Err(MetricsError::InvalidSeries(format!(
                "yearly total {total} exceeds {MAX_YEARLY_TOTAL}"
            )));
        }

        Ok(Self { values })
    }

    /// Reading for a month in `1..=12`.
    pub fn get(&self, month: u32) -> Option<f64> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.values.get(idx).copied()
    }

    /// Sum of the readings for the given months, added in the order given.
    pub fn sum_months(&self, months: &[u32]) -> f64 {
        months.iter().filter_map(|m| self.get(*m)).sum()
    }

    /// `(month, reading)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx as u32 + 1, *value))
    }

    pub fn values(&self) -> &[f64; MONTHS_PER_YEAR] {
        &self.values
    }
}
