use serde::Serialize;

use super::seasonal::Season;
use super::series::{month_label, ConsumptionSeries};
use super::{round_half_up, MetricsError, Ratio};

/// A month together with its reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthValue {
    pub month: u32,
    pub label: &'static str,
    pub value: f64,
}

impl MonthValue {
    fn new(month: u32, value: f64) -> Self {
        Self {
            month,
            label: month_label(month),
            value,
        }
    }
}

/// Headline figures for one year of consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: f64,
    /// Monthly mean rounded to a whole number.
    pub mean: f64,
    pub peak: MonthValue,
    pub trough: MonthValue,
    /// How far the peak month sits above the mean, in percent.
    pub peak_deviation_pct: Ratio,
    /// How far the trough month sits below the mean, in percent.
    pub trough_deviation_pct: Ratio,
}

impl Statistics {
    pub fn compute(series: &ConsumptionSeries) -> Result<Self, MetricsError> {
        // Accumulated season by season so the seasonal sums add back up to
        // exactly this total.
        let total: f64 = Season::ALL
            .iter()
            .map(|s| series.sum_months(&s.months()))
            .sum();
        let mean = round_half_up(mean_of(total, series.values().len())?);

        let mut peak = MonthValue::new(1, series.values()[0]);
        let mut trough = peak;
        for (month, value) in series.iter() {
            // Strict comparisons keep the earliest month on ties.
            if value > peak.value {
                peak = MonthValue::new(month, value);
            }
            if value < trough.value {
                trough = MonthValue::new(month, value);
            }
        }

        Ok(Self {
            total,
            mean,
            peak,
            trough,
            peak_deviation_pct: deviation_pct(peak.value - mean, mean),
            trough_deviation_pct: deviation_pct(mean - trough.value, mean),
        })
    }
}

fn mean_of(total: f64, count: usize) -> Result<f64, MetricsError> {
    if count == 0 {
        return Err(MetricsError::DivisionUndefined);
    }
    Ok(total / count as f64)
}

fn deviation_pct(difference: f64, mean: f64) -> Ratio {
    if mean == 0.0 {
        Ratio::Unavailable
    } else {
        Ratio::Available(round_half_up(difference / mean * 100.0))
    }
}
