use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::ranking::{BoostWeights, RankOptions, ScoreWeights};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingOptionsConfig {
    pub consider_recency: bool,
    pub consider_popularity: bool,
    pub shuffle_within_tier: bool,
    pub top_performers: usize,
    pub random_seed: Option<u64>,
}

impl Default for RankingOptionsConfig {
    fn default() -> Self {
        Self {
            consider_recency: true,
            consider_popularity: true,
            shuffle_within_tier: true,
            top_performers: 4,
            random_seed: None,
        }
    }
}

impl RankingOptionsConfig {
    pub fn to_options(&self) -> RankOptions {
        RankOptions {
            consider_recency: self.consider_recency,
            consider_popularity: self.consider_popularity,
            shuffle_within_tier: self.shuffle_within_tier,
            top_performers: self.top_performers,
            random_seed: self.random_seed,
            reference_time: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3001".to_string(),
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub options: RankingOptionsConfig,
    pub weights: ScoreWeights,
    pub boost: BoostWeights,
    pub marketplace: MarketplaceConfig,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            options: RankingOptionsConfig::default(),
            weights: ScoreWeights::default(),
            boost: BoostWeights::default(),
            marketplace: MarketplaceConfig::default(),
        }
    }
}

impl RankingConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                RankingConfig::default()
            }
        } else {
            RankingConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(seed) = env::var("RANKER_SEED") {
            if let Ok(value) = seed.parse::<u64>() {
                self.options.random_seed = Some(value);
            }
        }
        if let Ok(endpoint) = env::var("MARKETPLACE_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.marketplace.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("MARKETPLACE_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.marketplace.timeout_ms = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("RANKER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/ranker.toml")))
}
