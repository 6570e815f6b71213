use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranking::rng::{shuffle, JitterRng};
use crate::{normalize_ad, AdRecord, NormalizedAd};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub recency_weight: f64,
    pub recency_window_days: f64,
    pub rating_weight: f64,
    pub review_weight: f64,
    pub review_cap: u32,
    pub jitter: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            recency_weight: 0.1,
            recency_window_days: 30.0,
            rating_weight: 0.2,
            review_weight: 0.01,
            review_cap: 50,
            jitter: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankOptions {
    pub consider_recency: bool,
    pub consider_popularity: bool,
    pub shuffle_within_tier: bool,
    pub top_performers: usize,
    pub random_seed: Option<u64>,
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            consider_recency: true,
            consider_popularity: true,
            shuffle_within_tier: true,
            top_performers: 4,
            random_seed: None,
            reference_time: None,
        }
    }
}

#[derive(Debug, Clone)]
struct ScoredAd {
    ad: AdRecord,
    score: f64,
}

#[derive(Debug, Clone)]
pub struct TierRanker {
    weights: ScoreWeights,
    consider_recency: bool,
    consider_popularity: bool,
}

impl TierRanker {
    pub fn new(weights: ScoreWeights, consider_recency: bool, consider_popularity: bool) -> Self {
        Self {
            weights,
            consider_recency,
            consider_popularity,
        }
    }

    pub fn recency_score(&self, ad: &NormalizedAd, now: DateTime<Utc>) -> f64 {
        ad.created_at
            .map(|created| {
                let days = (now - created).num_seconds() as f64 / SECONDS_PER_DAY;
                (self.weights.recency_window_days - days).max(0.0) * self.weights.recency_weight
            })
            .unwrap_or(0.0)
    }

    pub fn popularity_score(&self, ad: &NormalizedAd) -> f64 {
        let reviews = ad.review_count.min(self.weights.review_cap);
        ad.rating * self.weights.rating_weight + reviews as f64 * self.weights.review_weight
    }

    pub fn score(&self, ad: &NormalizedAd, now: DateTime<Utc>, jitter_draw: f64) -> f64 {
        let mut score = 0.0;
        if self.consider_recency {
            score += self.recency_score(ad, now);
        }
        if self.consider_popularity {
            score += self.popularity_score(ad);
        }
        score + jitter_draw * self.weights.jitter
    }

    pub fn rank(
        &self,
        ads: &[AdRecord],
        now: DateTime<Utc>,
        top_performers: usize,
        rng: &mut JitterRng,
    ) -> Vec<AdRecord> {
        if ads.len() <= 1 {
            return ads.to_vec();
        }

        let mut scored: Vec<ScoredAd> = ads
            .iter()
            .map(|ad| {
                let normalized = normalize_ad(ad);
                let score = self.score(&normalized, now, rng.next_f64());
                ScoredAd {
                    ad: ad.clone(),
                    score,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let head = top_performers.min(scored.len());
        let top: Vec<AdRecord> = scored[..head].iter().map(|entry| entry.ad.clone()).collect();
        let mut ranked = shuffle(&top, rng);
        ranked.extend(scored[head..].iter().map(|entry| entry.ad.clone()));
        ranked
    }
}
