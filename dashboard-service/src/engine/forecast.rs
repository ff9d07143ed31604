//! Heuristic projections shown on the predictions tab.
//!
//! Neither figure is a trained model or a tariff computation: the next-period
//! value is a flat uplift on the mean, and the cost figure is an estimate of
//! the amount due, not a bill. Coefficients are product policy.

use serde::Serialize;

use super::seasonal::SeasonalTotals;
use super::round_half_up;

/// Placeholder +5% projection applied to the monthly mean.
pub const NEXT_PERIOD_GROWTH: f64 = 1.05;

pub const WINTER_COST_WEIGHT: f64 = 1.3;
pub const SPRING_COST_WEIGHT: f64 = 0.8;
pub const SUMMER_COST_WEIGHT: f64 = 0.9;
pub const AUTUMN_COST_WEIGHT: f64 = 1.2;

/// Rate applied to the weighted seasonal consumption.
pub const COST_RATE: f64 = 10.0 - 5.55;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub next_period: f64,
    pub cost_estimate: f64,
}

impl Forecast {
    pub fn estimate(mean: f64, seasons: &SeasonalTotals) -> Self {
        Self {
            next_period: next_period(mean),
            cost_estimate: cost_estimate(seasons),
        }
    }
}

pub fn next_period(mean: f64) -> f64 {
    round_half_up(mean * NEXT_PERIOD_GROWTH)
}

pub fn cost_estimate(seasons: &SeasonalTotals) -> f64 {
    let weighted = seasons.autumn * AUTUMN_COST_WEIGHT
        + seasons.summer * SUMMER_COST_WEIGHT
        + seasons.winter * WINTER_COST_WEIGHT
        + seasons.spring * SPRING_COST_WEIGHT;
    round_half_up(weighted * COST_RATE)
}
