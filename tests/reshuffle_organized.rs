use std::collections::BTreeMap;

use ad_ranker::config::RankingConfig;
use ad_ranker::ranking::{reshuffle_stats, Tier};
use ad_ranker::{
    rank_listing, reshuffle_listings, smart_reshuffle_listings, AdId, AdRecord, UserBehavior,
};

fn ad(id: i64, tier: Option<i64>) -> AdRecord {
    AdRecord {
        id: Some(AdId::Int(id)),
        seller_tier: tier,
        ..AdRecord::default()
    }
}

fn ids(ads: &[AdRecord]) -> Vec<i64> {
    ads.iter()
        .map(|ad| match ad.id.as_ref() {
            Some(AdId::Int(value)) => *value,
            _ => panic!("expected integer id"),
        })
        .collect()
}

fn seeded_config(seed: u64) -> RankingConfig {
    let mut config = RankingConfig::default();
    config.options.random_seed = Some(seed);
    config
}

#[test]
fn empty_and_singleton_subcategories_pass_through() {
    let mut listings = BTreeMap::new();
    listings.insert("10".to_string(), Vec::new());
    listings.insert("20".to_string(), vec![ad(9, Some(1))]);

    let reshuffled = reshuffle_listings(&listings, &seeded_config(42));

    assert!(reshuffled.get("10").unwrap().is_empty());
    assert_eq!(ids(reshuffled.get("20").unwrap()), vec![9]);
}

#[test]
fn stats_report_no_changes_for_identical_collections() {
    let mut listings = BTreeMap::new();
    listings.insert("1".to_string(), vec![ad(1, Some(4)), ad(2, Some(1))]);
    listings.insert("2".to_string(), vec![ad(3, Some(3))]);

    let stats = reshuffle_stats(&listings, &listings.clone());

    assert_eq!(stats.total_subcategories, 2);
    assert_eq!(stats.shuffled_subcategories, 0);
    assert!(stats.changes.is_empty());
    assert_eq!(stats.tier_distribution.premium, 1);
    assert_eq!(stats.tier_distribution.standard, 1);
    assert_eq!(stats.tier_distribution.free, 1);
    assert_eq!(stats.tier_distribution.total(), 3);
}

#[test]
fn stats_log_changed_subcategories() {
    let mut listings = BTreeMap::new();
    listings.insert("5".to_string(), vec![ad(1, Some(1)), ad(2, Some(4))]);

    let reshuffled = reshuffle_listings(&listings, &seeded_config(8));
    assert_eq!(ids(reshuffled.get("5").unwrap()), vec![2, 1]);

    let stats = reshuffle_stats(&listings, &reshuffled);
    assert_eq!(stats.shuffled_subcategories, 1);
    assert_eq!(stats.changes.len(), 1);
    assert_eq!(stats.changes[0].subcategory_id, "5");
    assert_eq!(stats.changes[0].original_order, vec!["1", "2"]);
    assert_eq!(stats.changes[0].new_order, vec!["2", "1"]);
    assert_eq!(stats.tier_distribution.premium, 1);
    assert_eq!(stats.tier_distribution.free, 1);
}

#[test]
fn each_subcategory_keeps_its_ads() {
    let mut listings = BTreeMap::new();
    listings.insert(
        "1".to_string(),
        (1..=6).map(|id| ad(id, Some((id % 4) + 1))).collect(),
    );
    listings.insert(
        "2".to_string(),
        (7..=12).map(|id| ad(id, Some((id % 4) + 1))).collect(),
    );

    let reshuffled = reshuffle_listings(&listings, &seeded_config(42));

    for (key, before) in &listings {
        let mut expected = ids(before);
        expected.sort();
        let mut actual = ids(reshuffled.get(key).unwrap());
        actual.sort();
        assert_eq!(actual, expected);
    }
}

#[test]
fn subcategories_diverge_under_a_single_base_seed() {
    let ads: Vec<AdRecord> = (1..=8).map(|id| ad(id, Some(4))).collect();
    let mut listings = BTreeMap::new();
    listings.insert("1".to_string(), ads.clone());
    listings.insert("2".to_string(), ads);

    let mut any_diverged = false;
    for seed in 1..=10 {
        let reshuffled = reshuffle_listings(&listings, &seeded_config(seed));
        if ids(reshuffled.get("1").unwrap()) != ids(reshuffled.get("2").unwrap()) {
            any_diverged = true;
            break;
        }
    }
    assert!(any_diverged);
}

#[test]
fn non_numeric_subcategory_keys_are_deterministic() {
    let mut listings = BTreeMap::new();
    listings.insert(
        "electronics".to_string(),
        (1..=6).map(|id| ad(id, Some(4))).collect::<Vec<_>>(),
    );

    let first = reshuffle_listings(&listings, &seeded_config(5));
    let second = reshuffle_listings(&listings, &seeded_config(5));

    assert_eq!(
        ids(first.get("electronics").unwrap()),
        ids(second.get("electronics").unwrap())
    );
}

#[test]
fn smart_reshuffle_annotates_boost_scores() {
    let mut preferred = ad(1, Some(4));
    preferred.category_name = Some("Electronics".to_string());
    let clicked = ad(2, Some(4));
    let avoided = ad(3, Some(4));
    let mut both = ad(4, Some(4));
    both.category_name = Some("Electronics".to_string());
    let untouched = ad(5, Some(4));

    let mut listings = BTreeMap::new();
    listings.insert(
        "1".to_string(),
        vec![preferred, clicked, avoided, both, untouched],
    );

    let mut behavior = UserBehavior::default();
    behavior.preferred_categories.insert("Electronics".to_string());
    behavior.clicked_ads.insert(AdId::Int(2));
    behavior.clicked_ads.insert(AdId::Int(4));
    behavior.avoided_ads.insert(AdId::Int(3));

    let reshuffled = smart_reshuffle_listings(&listings, &behavior, &seeded_config(11));

    let boost_of = |id: i64| -> f64 {
        reshuffled
            .get("1")
            .unwrap()
            .iter()
            .find(|ad| ad.id == Some(AdId::Int(id)))
            .and_then(|ad| ad.extra.get("boost_score"))
            .and_then(|value| value.as_f64())
            .expect("boost_score should be present")
    };

    assert!((boost_of(1) - 0.3).abs() < 1e-6);
    assert!((boost_of(2) - 0.2).abs() < 1e-6);
    assert!((boost_of(3) + 0.5).abs() < 1e-6);
    assert!((boost_of(4) - 0.5).abs() < 1e-6);
    assert!((boost_of(5) - 0.0).abs() < 1e-6);
}

#[test]
fn boost_scores_do_not_change_the_ordering() {
    let mut listings = BTreeMap::new();
    listings.insert(
        "1".to_string(),
        (1..=8)
            .map(|id| {
                let mut record = ad(id, Some((id % 4) + 1));
                record.category_name = Some("Electronics".to_string());
                record
            })
            .collect::<Vec<_>>(),
    );

    let mut behavior = UserBehavior::default();
    behavior.preferred_categories.insert("Electronics".to_string());
    behavior.clicked_ads.insert(AdId::Int(2));
    behavior.avoided_ads.insert(AdId::Int(5));

    let config = seeded_config(77);
    let plain = reshuffle_listings(&listings, &config);
    let smart = smart_reshuffle_listings(&listings, &behavior, &config);

    assert_eq!(ids(plain.get("1").unwrap()), ids(smart.get("1").unwrap()));
}

#[test]
fn flat_convenience_entry_keeps_tier_order() {
    let ads: Vec<AdRecord> = (1..=9).map(|id| ad(id, Some((id % 4) + 1))).collect();
    let ranked = rank_listing(&ads, &seeded_config(3));

    let mut sorted = ids(&ranked);
    sorted.sort();
    assert_eq!(sorted, (1..=9).collect::<Vec<i64>>());

    let priorities: Vec<u8> = ranked
        .iter()
        .map(|ad| Tier::from_raw(ad.seller_tier).priority())
        .collect();
    for pair in priorities.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}
