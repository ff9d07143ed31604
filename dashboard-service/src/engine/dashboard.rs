use std::fmt;

use consumer_client::AccountRecord;
use serde::Serialize;

use super::classification::Classification;
use super::efficiency::Efficiency;
use super::forecast::Forecast;
use super::seasonal::{Season, SeasonalTotals};
use super::series::{month_label, ConsumptionSeries};
use super::statistics::Statistics;
use super::{MetricsError, Ratio};

/// One bar of the monthly chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: u32,
    pub label: &'static str,
    pub value: f64,
    /// Reading as a percentage of the peak month; 0 when the peak is 0.
    pub share_of_peak_pct: f64,
}

/// Everything the dashboard renders for one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub account_id: i64,
    pub is_commercial: bool,
    pub months: Vec<MonthlyPoint>,
    pub statistics: Statistics,
    pub seasons: SeasonalTotals,
    pub efficiency: Efficiency,
    pub classification: Classification,
    pub forecast: Forecast,
}

/// Derives the dashboard metrics for one account.
///
/// Only a malformed consumption series fails the whole account. Missing
/// denominators and an out-of-range commercial score degrade the affected
/// fields and leave the others intact.
pub fn compute_dashboard(record: &AccountRecord) -> Result<DashboardMetrics, MetricsError> {
    let series = ConsumptionSeries::from_months(&record.consumption)?;
    let statistics = Statistics::compute(&series)?;
    let seasons = SeasonalTotals::aggregate(&series);

    let efficiency = Efficiency::compute(
        &statistics,
        &seasons,
        record.total_area,
        record.residents_count,
    );
    let classification = Classification::from_probability(record.is_commercial_prob);
    let forecast = Forecast::estimate(statistics.mean, &seasons);

    Ok(DashboardMetrics {
        account_id: record.account_id,
        is_commercial: record.is_commercial,
        months: monthly_points(&series, statistics.peak.value),
        statistics,
        seasons,
        efficiency,
        classification,
        forecast,
    })
}

fn monthly_points(series: &ConsumptionSeries, peak: f64) -> Vec<MonthlyPoint> {
    series
        .iter()
        .map(|(month, value)| MonthlyPoint {
            month,
            label: month_label(month),
            value,
            share_of_peak_pct: if peak > 0.0 { value / peak * 100.0 } else { 0.0 },
        })
        .collect()
}

impl fmt::Display for DashboardMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.statistics;
        writeln!(f, "--- Account {} ---", self.account_id)?;
        writeln!(f, "Total:            {} kWh", s.total)?;
        writeln!(f, "Monthly mean:     {} kWh", s.mean)?;
        writeln!(
            f,
            "Peak:             {} {} kWh ({} above mean)",
            s.peak.label,
            s.peak.value,
            percent(s.peak_deviation_pct)
        )?;
        writeln!(
            f,
            "Trough:           {} {} kWh ({} below mean)",
            s.trough.label,
            s.trough.value,
            percent(s.trough_deviation_pct)
        )?;
        for season in Season::ALL {
            writeln!(f, "{:<18}{} kWh", format!("{}:", season.label()), self.seasons.get(season))?;
        }

        let e = &self.efficiency;
        writeln!(f, "Per m²:           {}", e.per_area)?;
        writeln!(f, "Per resident:     {}", e.per_resident)?;
        writeln!(f, "Variation:        {}", percent(e.variation_pct))?;
        writeln!(f, "Winter vs summer: {}", e.seasonal_swing)?;

        match &self.classification {
            Classification::Classified {
                band,
                probability_pct,
            } => writeln!(f, "Commercial use:   {probability_pct}% ({band})")?,
            Classification::InvalidProbability { probability } => {
                writeln!(f, "Commercial use:   unavailable (score {probability})")?
            }
        }
        writeln!(f, "Next month:       {} kWh (forecast)", self.forecast.next_period)?;
        write!(f, "Estimated due:    {}", self.forecast.cost_estimate)
    }
}

/// Percentage with its sign, or the bare dash when unavailable.
fn percent(ratio: Ratio) -> String {
    match ratio {
        Ratio::Available(v) => format!("{v}%"),
        Ratio::Unavailable => ratio.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn record(consumption: BTreeMap<u32, f64>) -> AccountRecord {
        AccountRecord {
            account_id: 1,
            is_commercial: false,
            address: "Sochi".to_string(),
            building_type: "Private".to_string(),
            rooms_count: 2,
            residents_count: 2,
            total_area: Some(50.0),
            consumption,
            is_commercial_prob: 0.5,
        }
    }

    fn flat_year(value: f64) -> BTreeMap<u32, f64> {
        (1..=12).map(|m| (m, value)).collect()
    }

    #[test]
    fn short_series_fails_the_whole_account() {
        let mut consumption = flat_year(10.0);
        consumption.remove(&12);
        let res = compute_dashboard(&record(consumption));
        assert!(matches!(res, Err(MetricsError::InvalidSeries(_))));
    }

    #[test]
    fn invalid_probability_only_blocks_classification() {
        let mut rec = record(flat_year(10.0));
        rec.is_commercial_prob = 1.5;

        let metrics = compute_dashboard(&rec).unwrap();
        assert_eq!(
            metrics.classification,
            Classification::InvalidProbability { probability: 1.5 }
        );
        assert_eq!(metrics.statistics.total, 120.0);
        assert_eq!(metrics.forecast.next_period, 11.0);
    }

    #[test]
    fn vacant_account_keeps_other_ratios() {
        let mut rec = record(flat_year(10.0));
        rec.residents_count = 0;

        let metrics = compute_dashboard(&rec).unwrap();
        assert_eq!(metrics.efficiency.per_resident, Ratio::Unavailable);
        assert_eq!(metrics.efficiency.per_area, Ratio::Available(2.4));
        assert_eq!(metrics.efficiency.variation_pct, Ratio::Available(0.0));
    }

    #[test]
    fn all_zero_year_degrades_to_unavailable_not_nan() {
        let metrics = compute_dashboard(&record(flat_year(0.0))).unwrap();

        assert_eq!(metrics.efficiency.variation_pct, Ratio::Unavailable);
        assert_eq!(
            metrics.efficiency.seasonal_swing,
            crate::engine::SeasonalSwing::Unavailable
        );
        assert!(metrics.months.iter().all(|p| p.share_of_peak_pct == 0.0));

        let json = serde_json::to_string(&metrics).unwrap();
        assert!(!json.contains("NaN"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn monthly_points_are_scaled_to_peak() {
        let mut consumption = flat_year(50.0);
        consumption.insert(4, 200.0);
        let metrics = compute_dashboard(&record(consumption)).unwrap();

        assert_eq!(metrics.months.len(), 12);
        assert_eq!(metrics.months[3].label, "Apr");
        assert_eq!(metrics.months[3].share_of_peak_pct, 100.0);
        assert_eq!(metrics.months[0].share_of_peak_pct, 25.0);
    }

    #[test]
    fn display_marks_unavailable_fields() {
        let mut rec = record(flat_year(10.0));
        rec.total_area = None;
        let text = compute_dashboard(&rec).unwrap().to_string();

        assert!(text.contains("Per m²:           —"));
        assert!(text.contains("Account 1"));
        assert!(text.contains("Variation:        0%"));
    }

    #[test]
    fn display_never_puts_percent_after_dash() {
        let text = compute_dashboard(&record(flat_year(0.0))).unwrap().to_string();

        assert!(text.contains("(— above mean)"));
        assert!(text.contains("(— below mean)"));
        assert!(text.contains("Variation:        —\n"));
        assert!(!text.contains("—%"));
    }

    #[test]
    fn overflowing_readings_fail_the_whole_account() {
        let res = compute_dashboard(&record(flat_year(1e308)));
        assert!(matches!(res, Err(MetricsError::InvalidSeries(_))));
    }
}
