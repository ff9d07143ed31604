use std::fmt;

use serde::Serialize;

use super::seasonal::SeasonalTotals;
use super::statistics::Statistics;
use super::{round_half_up, Ratio};

/// Swings larger than this (in percent) are reported as [`SeasonalSwing::Extreme`]
/// rather than as a number. Product policy carried over from the dashboard.
pub const EXTREME_SWING_THRESHOLD_PCT: f64 = 10_000.0;

/// Winter consumption relative to summer consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum SeasonalSwing {
    Percent(f64),
    Extreme,
    Unavailable,
}

impl fmt::Display for SeasonalSwing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonalSwing::Percent(p) => write!(f, "{p}%"),
            SeasonalSwing::Extreme => write!(f, "extreme swing"),
            SeasonalSwing::Unavailable => write!(f, "—"),
        }
    }
}

/// Consumption normalised by floor area and occupancy, plus stability indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Efficiency {
    /// Yearly total per square metre.
    pub per_area: Ratio,
    /// Monthly mean per square metre, rounded.
    pub mean_per_area: Ratio,
    /// Monthly mean per resident, rounded.
    pub per_resident: Ratio,
    pub variation_pct: Ratio,
    pub seasonal_swing: SeasonalSwing,
}

impl Efficiency {
    pub fn compute(
        stats: &Statistics,
        seasons: &SeasonalTotals,
        total_area: Option<f64>,
        residents_count: u32,
    ) -> Self {
        let area = usable_area(total_area);

        Self {
            per_area: area.map_or(Ratio::Unavailable, |a| Ratio::finite(stats.total / a)),
            mean_per_area: area.map_or(Ratio::Unavailable, |a| {
                Ratio::finite(round_half_up(stats.mean / a))
            }),
            per_resident: per_resident(stats.mean, residents_count),
            variation_pct: variation_pct(stats),
            seasonal_swing: seasonal_swing(seasons.winter, seasons.summer),
        }
    }
}

fn usable_area(total_area: Option<f64>) -> Option<f64> {
    total_area.filter(|a| a.is_finite() && *a > 0.0)
}

pub fn per_resident(mean: f64, residents_count: u32) -> Ratio {
    if residents_count == 0 {
        Ratio::Unavailable
    } else {
        Ratio::Available(round_half_up(mean / f64::from(residents_count)))
    }
}

/// Spread between the peak and trough months relative to the mean.
pub fn variation_pct(stats: &Statistics) -> Ratio {
    if stats.mean == 0.0 {
        Ratio::Unavailable
    } else {
        Ratio::Available(round_half_up(
            (stats.peak.value - stats.trough.value) / stats.mean * 100.0,
        ))
    }
}

pub fn seasonal_swing(winter: f64, summer: f64) -> SeasonalSwing {
    if summer == 0.0 {
        return SeasonalSwing::Unavailable;
    }

    let pct = round_half_up((winter - summer) / summer * 100.0);
    if pct.abs() > EXTREME_SWING_THRESHOLD_PCT {
        SeasonalSwing::Extreme
    } else {
        SeasonalSwing::Percent(pct)
    }
}
