use std::fmt;

use serde::Serialize;

use super::{round_half_up, MetricsError};

/// Scores strictly above this are [`ClassificationBand::High`].
pub const HIGH_BAND_THRESHOLD: f64 = 0.7;
/// Scores strictly above this (and not high) are [`ClassificationBand::Medium`].
pub const MEDIUM_BAND_THRESHOLD: f64 = 0.4;

/// Qualitative likelihood that an account is used commercially.
///
/// Variants are declared low to high so `Ord` follows the band order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationBand {
    Low,
    Medium,
    High,
}

impl ClassificationBand {
    pub fn classify(prob: f64) -> Result<Self, MetricsError> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(MetricsError::InvalidProbability(prob));
        }

        Ok(if prob > HIGH_BAND_THRESHOLD {
            ClassificationBand::High
        } else if prob > MEDIUM_BAND_THRESHOLD {
            ClassificationBand::Medium
        } else {
            ClassificationBand::Low
        })
    }
}

impl fmt::Display for ClassificationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationBand::Low => write!(f, "low probability of commercial use"),
            ClassificationBand::Medium => write!(f, "medium probability of commercial use"),
            ClassificationBand::High => write!(f, "high probability of commercial use"),
        }
    }
}

/// Classification section of the dashboard.
///
/// An out-of-range score blocks only this section; the rest of the metrics are
/// still shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    #[serde(rename_all = "camelCase")]
    Classified {
        band: ClassificationBand,
        probability_pct: f64,
    },
    InvalidProbability { probability: f64 },
}

impl Classification {
    pub fn from_probability(prob: f64) -> Self {
        match ClassificationBand::classify(prob) {
            Ok(band) => Classification::Classified {
                band,
                probability_pct: round_half_up(prob * 100.0),
            },
            Err(_) => Classification::InvalidProbability { probability: prob },
        }
    }

    pub fn band(&self) -> Option<ClassificationBand> {
        match self {
            Classification::Classified { band, .. } => Some(*band),
            Classification::InvalidProbability { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_belong_to_the_lower_band() {
        assert_eq!(ClassificationBand::classify(0.845643), Ok(ClassificationBand::High));
        assert_eq!(ClassificationBand::classify(0.7), Ok(ClassificationBand::Medium));
        assert_eq!(ClassificationBand::classify(0.4000001), Ok(ClassificationBand::Medium));
        assert_eq!(ClassificationBand::classify(0.4), Ok(ClassificationBand::Low));
        assert_eq!(ClassificationBand::classify(0.0), Ok(ClassificationBand::Low));
        assert_eq!(ClassificationBand::classify(1.0), Ok(ClassificationBand::High));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        assert_eq!(
            ClassificationBand::classify(1.2),
            Err(MetricsError::InvalidProbability(1.2))
        );
        assert!(ClassificationBand::classify(-0.01).is_err());
        assert!(ClassificationBand::classify(f64::NAN).is_err());
    }

    #[test]
    fn bands_never_decrease_as_probability_grows() {
        let bands: Vec<ClassificationBand> = (0..=1000)
            .map(|i| ClassificationBand::classify(f64::from(i) / 1000.0).unwrap())
            .collect();
        assert!(bands.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn classification_reports_rounded_percentage() {
        let c = Classification::from_probability(0.345643);
        assert_eq!(
            c,
            Classification::Classified {
                band: ClassificationBand::Low,
                probability_pct: 35.0
            }
        );

        let invalid = Classification::from_probability(3.0);
        assert_eq!(invalid.band(), None);
    }
}
