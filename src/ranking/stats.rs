use std::collections::BTreeMap;

use serde::Serialize;

use crate::ranking::tier::Tier;
use crate::AdRecord;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TierDistribution {
    pub premium: usize,
    pub standard: usize,
    pub basic: usize,
    pub free: usize,
}

impl TierDistribution {
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Premium => self.premium += 1,
            Tier::Standard => self.standard += 1,
            Tier::Basic => self.basic += 1,
            Tier::Free => self.free += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.premium + self.standard + self.basic + self.free
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubcategoryChange {
    pub subcategory_id: String,
    pub original_order: Vec<String>,
    pub new_order: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReshuffleStats {
    pub total_subcategories: usize,
    pub shuffled_subcategories: usize,
    pub tier_distribution: TierDistribution,
    pub changes: Vec<SubcategoryChange>,
}

pub fn reshuffle_stats(
    original: &BTreeMap<String, Vec<AdRecord>>,
    reshuffled: &BTreeMap<String, Vec<AdRecord>>,
) -> ReshuffleStats {
    let mut tier_distribution = TierDistribution::default();
    for ads in reshuffled.values() {
        for ad in ads {
            tier_distribution.record(Tier::from_raw(ad.seller_tier));
        }
    }

    let mut changes = Vec::new();
    for (key, before) in original {
        let after = match reshuffled.get(key) {
            Some(after) => after,
            None => continue,
        };
        let original_order = id_order(before);
        let new_order = id_order(after);
        if original_order != new_order {
            changes.push(SubcategoryChange {
                subcategory_id: key.clone(),
                original_order,
                new_order,
            });
        }
    }

    ReshuffleStats {
        total_subcategories: original.len(),
        shuffled_subcategories: changes.len(),
        tier_distribution,
        changes,
    }
}

fn id_order(ads: &[AdRecord]) -> Vec<String> {
    ads.iter()
        .map(|ad| {
            ad.id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default()
        })
        .collect()
}
