use std::path::PathBuf;

use ad_ranker::config::RankingConfig;

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ad-ranker-{}-{}.toml", name, std::process::id()))
}

#[test]
fn defaults_carry_the_scoring_constants() {
    let config = RankingConfig::default();

    assert!((config.weights.recency_weight - 0.1).abs() < 1e-6);
    assert!((config.weights.recency_window_days - 30.0).abs() < 1e-6);
    assert!((config.weights.rating_weight - 0.2).abs() < 1e-6);
    assert!((config.weights.review_weight - 0.01).abs() < 1e-6);
    assert_eq!(config.weights.review_cap, 50);
    assert!((config.weights.jitter - 0.5).abs() < 1e-6);
    assert_eq!(config.options.top_performers, 4);
    assert!((config.boost.preferred_category - 0.3).abs() < 1e-6);
    assert!((config.boost.clicked - 0.2).abs() < 1e-6);
    assert!((config.boost.avoided - 0.5).abs() < 1e-6);
}

#[test]
fn written_config_loads_back() {
    let path = temp_config_path("roundtrip");

    let mut config = RankingConfig::default();
    config.options.random_seed = Some(42);
    config.options.top_performers = 6;
    config.marketplace.endpoint = "http://marketplace.test".to_string();
    config.write(&path).expect("config should write");

    let (loaded, loaded_path) =
        RankingConfig::load(Some(path.clone())).expect("config should load");
    assert_eq!(loaded_path, Some(path.clone()));
    assert_eq!(loaded.options.random_seed, Some(42));
    assert_eq!(loaded.options.top_performers, 6);
    assert_eq!(loaded.marketplace.endpoint, "http://marketplace.test");

    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let path = temp_config_path("missing");
    let _ = std::fs::remove_file(&path);

    let (loaded, _) = RankingConfig::load(Some(path)).expect("load should not fail");
    assert_eq!(loaded.options.top_performers, 4);
    assert!(loaded.options.consider_recency);
}
