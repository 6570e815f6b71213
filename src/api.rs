use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ad_ranker::config::RankingConfig;
use ad_ranker::ranking::{ReshuffleEngine, ReshuffleStats};
use ad_ranker::{AdRecord, UserBehavior};

#[derive(Debug, Deserialize)]
pub struct ApiRankRequest {
    #[serde(default)]
    pub ads: Vec<AdRecord>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub consider_recency: Option<bool>,
    #[serde(default)]
    pub consider_popularity: Option<bool>,
    #[serde(default)]
    pub shuffle_within_tier: Option<bool>,
    #[serde(default)]
    pub top_performers: Option<usize>,
}

impl ApiRankRequest {
    pub fn engine(&self, config: &RankingConfig) -> ReshuffleEngine {
        ReshuffleEngine::from_config(&apply_overrides(
            config,
            self.seed,
            self.consider_recency,
            self.consider_popularity,
            self.shuffle_within_tier,
            self.top_performers,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiRankResponse {
    pub count: usize,
    pub ads: Vec<AdRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ApiReshuffleRequest {
    #[serde(default)]
    pub listings: BTreeMap<String, Vec<AdRecord>>,
    #[serde(default)]
    pub behavior: Option<UserBehavior>,
    #[serde(default)]
    pub include_stats: Option<bool>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub consider_recency: Option<bool>,
    #[serde(default)]
    pub consider_popularity: Option<bool>,
    #[serde(default)]
    pub shuffle_within_tier: Option<bool>,
    #[serde(default)]
    pub top_performers: Option<usize>,
}

impl ApiReshuffleRequest {
    pub fn engine(&self, config: &RankingConfig) -> ReshuffleEngine {
        ReshuffleEngine::from_config(&apply_overrides(
            config,
            self.seed,
            self.consider_recency,
            self.consider_popularity,
            self.shuffle_within_tier,
            self.top_performers,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiReshuffleResponse {
    pub listings: BTreeMap<String, Vec<AdRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ReshuffleStats>,
}

fn apply_overrides(
    config: &RankingConfig,
    seed: Option<u64>,
    consider_recency: Option<bool>,
    consider_popularity: Option<bool>,
    shuffle_within_tier: Option<bool>,
    top_performers: Option<usize>,
) -> RankingConfig {
    let mut config = config.clone();
    if let Some(value) = seed {
        config.options.random_seed = Some(value);
    }
    if let Some(value) = consider_recency {
        config.options.consider_recency = value;
    }
    if let Some(value) = consider_popularity {
        config.options.consider_popularity = value;
    }
    if let Some(value) = shuffle_within_tier {
        config.options.shuffle_within_tier = value;
    }
    if let Some(value) = top_performers {
        config.options.top_performers = value;
    }
    config
}
