use ad_ranker::analytics::{
    classify_trend, growth_rate, series_growth, GrowthSummary, Trend, DEFAULT_TREND_THRESHOLD,
};

#[test]
fn growth_rate_is_percent_change() {
    assert!((growth_rate(100.0, 150.0) - 50.0).abs() < 1e-6);
    assert!((growth_rate(200.0, 100.0) + 50.0).abs() < 1e-6);
    assert!((growth_rate(80.0, 80.0) - 0.0).abs() < 1e-6);
}

#[test]
fn growth_rate_handles_zero_baseline() {
    assert!((growth_rate(0.0, 0.0) - 0.0).abs() < 1e-6);
    assert!((growth_rate(0.0, 42.0) - 100.0).abs() < 1e-6);
}

#[test]
fn trend_classification_respects_threshold() {
    assert_eq!(classify_trend(6.0, DEFAULT_TREND_THRESHOLD), Trend::Rising);
    assert_eq!(classify_trend(-6.0, DEFAULT_TREND_THRESHOLD), Trend::Falling);
    assert_eq!(classify_trend(3.0, DEFAULT_TREND_THRESHOLD), Trend::Stable);
    assert_eq!(classify_trend(-3.0, DEFAULT_TREND_THRESHOLD), Trend::Stable);
    assert_eq!(classify_trend(5.0, DEFAULT_TREND_THRESHOLD), Trend::Stable);
    assert_eq!(Trend::Rising.label(), "Rising");
}

#[test]
fn summary_pairs_rate_with_trend() {
    let summary = GrowthSummary::compute(100.0, 112.0, DEFAULT_TREND_THRESHOLD);
    assert!((summary.growth_rate - 12.0).abs() < 1e-6);
    assert_eq!(summary.trend, Trend::Rising);
}

#[test]
fn series_growth_summarizes_consecutive_periods() {
    let summaries = series_growth(&[100.0, 110.0, 99.0], DEFAULT_TREND_THRESHOLD);

    assert_eq!(summaries.len(), 2);
    assert!((summaries[0].growth_rate - 10.0).abs() < 1e-6);
    assert_eq!(summaries[0].trend, Trend::Rising);
    assert!((summaries[1].growth_rate + 10.0).abs() < 1e-6);
    assert_eq!(summaries[1].trend, Trend::Falling);
}

#[test]
fn short_series_produces_no_summaries() {
    assert!(series_growth(&[42.0], DEFAULT_TREND_THRESHOLD).is_empty());
    assert!(series_growth(&[], DEFAULT_TREND_THRESHOLD).is_empty());
}
