use serde::{Deserialize, Serialize};

pub const DEFAULT_TREND_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Rising => "Rising",
            Trend::Stable => "Stable",
            Trend::Falling => "Falling",
        }
    }
}

pub fn growth_rate(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        if current == 0.0 {
            return 0.0;
        }
        return 100.0;
    }
    (current - previous) / previous * 100.0
}

pub fn classify_trend(rate: f64, threshold: f64) -> Trend {
    if rate > threshold {
        Trend::Rising
    } else if rate < -threshold {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthSummary {
    pub previous: f64,
    pub current: f64,
    pub growth_rate: f64,
    pub trend: Trend,
}

impl GrowthSummary {
    pub fn compute(previous: f64, current: f64, threshold: f64) -> Self {
        let rate = growth_rate(previous, current);
        Self {
            previous,
            current,
            growth_rate: rate,
            trend: classify_trend(rate, threshold),
        }
    }
}

pub fn series_growth(values: &[f64], threshold: f64) -> Vec<GrowthSummary> {
    values
        .windows(2)
        .map(|pair| GrowthSummary::compute(pair[0], pair[1], threshold))
        .collect()
}
