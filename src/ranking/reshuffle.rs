use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RankingConfig;
use crate::ranking::rng::JitterRng;
use crate::ranking::tier::partition_by_tier;
use crate::ranking::{RankOptions, TierRanker};
use crate::{stable_hash64, AdRecord, UserBehavior};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostWeights {
    pub preferred_category: f64,
    pub clicked: f64,
    pub avoided: f64,
}

impl Default for BoostWeights {
    fn default() -> Self {
        Self {
            preferred_category: 0.3,
            clicked: 0.2,
            avoided: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReshuffleEngine {
    ranker: TierRanker,
    options: RankOptions,
    boost: BoostWeights,
}

impl ReshuffleEngine {
    pub fn new(ranker: TierRanker, options: RankOptions, boost: BoostWeights) -> Self {
        Self {
            ranker,
            options,
            boost,
        }
    }

    pub fn from_config(config: &RankingConfig) -> Self {
        let options = config.options.to_options();
        let ranker = TierRanker::new(
            config.weights.clone(),
            options.consider_recency,
            options.consider_popularity,
        );
        Self::new(ranker, options, config.boost.clone())
    }

    fn reference_time(&self) -> DateTime<Utc> {
        self.options.reference_time.unwrap_or_else(Utc::now)
    }

    fn order_by_tier(
        &self,
        ads: &[AdRecord],
        now: DateTime<Utc>,
        rng: &mut JitterRng,
    ) -> Vec<AdRecord> {
        let mut ordered = Vec::with_capacity(ads.len());
        for (_, bucket) in partition_by_tier(ads) {
            if self.options.shuffle_within_tier {
                ordered.extend(self.ranker.rank(&bucket, now, self.options.top_performers, rng));
            } else {
                ordered.extend(bucket);
            }
        }
        ordered
    }

    pub fn shuffle_ads_by_tier(&self, ads: &[AdRecord]) -> Vec<AdRecord> {
        if ads.is_empty() {
            return Vec::new();
        }

        let now = self.reference_time();
        let mut rng = JitterRng::from_seed(self.options.random_seed);
        self.order_by_tier(ads, now, &mut rng)
    }

    pub fn reshuffle_organized(
        &self,
        collection: &BTreeMap<String, Vec<AdRecord>>,
    ) -> BTreeMap<String, Vec<AdRecord>> {
        let now = self.reference_time();
        let mut reshuffled = BTreeMap::new();
        for (key, ads) in collection {
            if ads.is_empty() {
                reshuffled.insert(key.clone(), Vec::new());
                continue;
            }

            let seed = self
                .options
                .random_seed
                .map(|base| base.wrapping_add(numeric_key_value(key)));
            let mut rng = JitterRng::from_seed(seed);
            reshuffled.insert(key.clone(), self.order_by_tier(ads, now, &mut rng));
        }
        reshuffled
    }

    pub fn smart_reshuffle(
        &self,
        collection: &BTreeMap<String, Vec<AdRecord>>,
        behavior: &UserBehavior,
    ) -> BTreeMap<String, Vec<AdRecord>> {
        let mut annotated = BTreeMap::new();
        for (key, ads) in collection {
            let ads: Vec<AdRecord> = ads
                .iter()
                .map(|ad| {
                    let mut ad = ad.clone();
                    let boost = self.boost_score(&ad, behavior);
                    if let Some(number) = serde_json::Number::from_f64(boost) {
                        ad.extra
                            .insert("boost_score".to_string(), serde_json::Value::Number(number));
                    }
                    ad
                })
                .collect();
            annotated.insert(key.clone(), ads);
        }
        // boost_score is carried on the records but not folded into ranking.
        self.reshuffle_organized(&annotated)
    }

    pub fn boost_score(&self, ad: &AdRecord, behavior: &UserBehavior) -> f64 {
        let mut boost = 0.0;
        if let Some(category) = ad.category_name.as_deref() {
            if behavior.preferred_categories.contains(category) {
                boost += self.boost.preferred_category;
            }
        }
        if let Some(id) = ad.id.as_ref() {
            if behavior.clicked_ads.contains(id) {
                boost += self.boost.clicked;
            }
            if behavior.avoided_ads.contains(id) {
                boost -= self.boost.avoided;
            }
        }
        boost
    }
}

// Numeric subcategory keys seed directly; other keys hash so buckets still
// diverge under a single base seed.
pub fn numeric_key_value(key: &str) -> u64 {
    key.trim()
        .parse::<u64>()
        .unwrap_or_else(|_| stable_hash64(key))
}
