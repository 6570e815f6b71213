pub mod ranker;
pub mod reshuffle;
pub mod rng;
pub mod stats;
pub mod tier;

pub use ranker::{RankOptions, ScoreWeights, TierRanker};
pub use reshuffle::{numeric_key_value, BoostWeights, ReshuffleEngine};
pub use rng::{shuffle, JitterRng, SeededRandom};
pub use stats::{reshuffle_stats, ReshuffleStats, SubcategoryChange, TierDistribution};
pub use tier::{partition_by_tier, Tier};
