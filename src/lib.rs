pub mod analytics;
pub mod config;
pub mod debounce;
pub mod marketplace;
pub mod ranking;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::RankingConfig;
use crate::ranking::{ReshuffleEngine, Tier};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdId {
    Int(i64),
    Text(String),
}

impl fmt::Display for AdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdId::Int(value) => write!(f, "{}", value),
            AdId::Text(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdRecord {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<AdId>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub seller_tier: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_float", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_float", skip_serializing_if = "Option::is_none")]
    pub mean_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_float", skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub total_reviews: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct NormalizedAd {
    pub id: Option<AdId>,
    pub tier: Tier,
    pub rating: f64,
    pub review_count: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserBehavior {
    #[serde(default)]
    pub preferred_categories: HashSet<String>,
    #[serde(default)]
    pub clicked_ads: HashSet<AdId>,
    #[serde(default)]
    pub avoided_ads: HashSet<AdId>,
    #[serde(default)]
    pub time_on_page_ms: u64,
}

pub fn normalize_ad(ad: &AdRecord) -> NormalizedAd {
    let rating = ad
        .rating
        .or(ad.mean_rating)
        .or(ad.average_rating)
        .unwrap_or(0.0);
    let review_count = ad
        .review_count
        .or(ad.reviews_count)
        .or(ad.total_reviews)
        .unwrap_or(0)
        .clamp(0, u32::MAX as i64) as u32;

    NormalizedAd {
        id: ad.id.clone(),
        tier: Tier::from_raw(ad.seller_tier),
        rating,
        review_count,
        created_at: ad.created_at.as_deref().and_then(parse_created_at),
        category: ad.category_name.clone(),
    }
}

pub fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

pub fn rank_listing(ads: &[AdRecord], config: &RankingConfig) -> Vec<AdRecord> {
    ReshuffleEngine::from_config(config).shuffle_ads_by_tier(ads)
}

pub fn reshuffle_listings(
    collection: &BTreeMap<String, Vec<AdRecord>>,
    config: &RankingConfig,
) -> BTreeMap<String, Vec<AdRecord>> {
    ReshuffleEngine::from_config(config).reshuffle_organized(collection)
}

pub fn smart_reshuffle_listings(
    collection: &BTreeMap<String, Vec<AdRecord>>,
    behavior: &UserBehavior,
    config: &RankingConfig,
) -> BTreeMap<String, Vec<AdRecord>> {
    ReshuffleEngine::from_config(config).smart_reshuffle(collection, behavior)
}

pub(crate) fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<AdId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(number) => number
            .as_i64()
            .map(AdId::Int)
            .or_else(|| Some(AdId::Text(number.to_string()))),
        Value::String(text) => Some(AdId::Text(text)),
        _ => None,
    }))
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(text) => Some(text),
        _ => None,
    }))
}
