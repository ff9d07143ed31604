//! Derived-metrics engine for the consumer dashboard.
//!
//! Every function here is a pure transformation of one account's data. Nothing
//! is cached or shared between accounts, so callers may compute metrics for
//! many accounts concurrently without coordination.

pub mod classification;
pub mod dashboard;
pub mod efficiency;
pub mod forecast;
pub mod seasonal;
pub mod series;
pub mod statistics;

use std::fmt;

use serde::Serialize;

pub use classification::{Classification, ClassificationBand};
pub use dashboard::{compute_dashboard, DashboardMetrics, MonthlyPoint};
pub use efficiency::{Efficiency, SeasonalSwing};
pub use forecast::Forecast;
pub use seasonal::{Season, SeasonalTotals};
pub use series::ConsumptionSeries;
pub use statistics::{MonthValue, Statistics};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("invalid consumption series: {0}")]
    InvalidSeries(String),
    #[error("mean is undefined for an empty series")]
    DivisionUndefined,
    #[error("commercial probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

/// A ratio that may be impossible to compute because its denominator is
/// missing or zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Ratio {
    Available(f64),
    Unavailable,
}

impl Ratio {
    pub fn value(self) -> Option<f64> {
        match self {
            Ratio::Available(v) => Some(v),
            Ratio::Unavailable => None,
        }
    }

    /// `Available` for a finite value, `Unavailable` for an overflow or NaN.
    pub fn finite(value: f64) -> Self {
        if value.is_finite() {
            Ratio::Available(value)
        } else {
            Ratio::Unavailable
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Ratio::Available(_))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Available(v) => write!(f, "{v}"),
            Ratio::Unavailable => write!(f, "—"),
        }
    }
}

/// Rounds to the nearest integer with halves going towards positive infinity,
/// so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(x: f64) -> f64 {
    // `x + 0.5` can itself round up for values just below a half, so only
    // exact halves are sent to `ceil`.
    if x - x.floor() == 0.5 {
        x.ceil()
    } else {
        x.round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_up_matches_dashboard_rounding() {
        assert_eq!(round_half_up(4607.5), 4608.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
    }

    #[test]
    fn round_half_up_keeps_values_just_below_a_half() {
        // largest double below 0.5; adding 0.5 to it rounds to 1.0
        assert_eq!(round_half_up(0.499_999_999_999_999_94), 0.0);
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(4_503_599_627_370_495.5), 4_503_599_627_370_496.0);
    }

    #[test]
    fn finite_ratio_drops_overflow() {
        assert_eq!(Ratio::finite(f64::INFINITY), Ratio::Unavailable);
        assert_eq!(Ratio::finite(f64::NAN), Ratio::Unavailable);
        assert_eq!(Ratio::finite(1.5), Ratio::Available(1.5));
    }

    #[test]
    fn unavailable_ratio_renders_as_dash() {
        assert_eq!(Ratio::Unavailable.to_string(), "—");
        assert_eq!(Ratio::Available(12.0).to_string(), "12");
        assert_eq!(Ratio::Unavailable.value(), None);
    }

    #[test]
    fn ratio_serializes_with_status_tag() {
        let available = serde_json::to_value(Ratio::Available(3.5)).unwrap();
        assert_eq!(available, serde_json::json!({"status": "available", "value": 3.5}));

        let unavailable = serde_json::to_value(Ratio::Unavailable).unwrap();
        assert_eq!(unavailable, serde_json::json!({"status": "unavailable"}));
    }
}
