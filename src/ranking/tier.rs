use serde::{Deserialize, Serialize};

use crate::AdRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Free = 1,
    Basic = 2,
    Standard = 3,
    Premium = 4,
}

impl Tier {
    pub const DESCENDING: [Tier; 4] = [Tier::Premium, Tier::Standard, Tier::Basic, Tier::Free];

    pub fn from_raw(value: Option<i64>) -> Self {
        match value {
            Some(4) => Tier::Premium,
            Some(3) => Tier::Standard,
            Some(2) => Tier::Basic,
            _ => Tier::Free,
        }
    }

    pub fn priority(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Premium => "Premium",
            Tier::Standard => "Standard",
            Tier::Basic => "Basic",
            Tier::Free => "Free",
        }
    }
}

pub fn partition_by_tier(ads: &[AdRecord]) -> Vec<(Tier, Vec<AdRecord>)> {
    let mut buckets = Vec::new();
    for tier in Tier::DESCENDING {
        let members: Vec<AdRecord> = ads
            .iter()
            .filter(|ad| Tier::from_raw(ad.seller_tier) == tier)
            .cloned()
            .collect();
        if !members.is_empty() {
            buckets.push((tier, members));
        }
    }
    buckets
}
