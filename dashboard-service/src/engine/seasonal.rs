use serde::Serialize;

use super::series::ConsumptionSeries;

/// Fixed three-month buckets. Winter spans the year end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn months(self) -> [u32; 3] {
        match self {
            Season::Winter => [12, 1, 2],
            Season::Spring => [3, 4, 5],
            Season::Summer => [6, 7, 8],
            Season::Autumn => [9, 10, 11],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }
}

/// Consumption summed per season, plus the largest bucket for chart scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalTotals {
    pub winter: f64,
    pub spring: f64,
    pub summer: f64,
    pub autumn: f64,
    pub max: f64,
}

impl SeasonalTotals {
    pub fn aggregate(series: &ConsumptionSeries) -> Self {
        let winter = series.sum_months(&Season::Winter.months());
        let spring = series.sum_months(&Season::Spring.months());
        let summer = series.sum_months(&Season::Summer.months());
        let autumn = series.sum_months(&Season::Autumn.months());

        Self {
            winter,
            spring,
            summer,
            autumn,
            max: winter.max(spring).max(summer).max(autumn),
        }
    }

    pub fn get(&self, season: Season) -> f64 {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Autumn => self.autumn,
        }
    }
}
