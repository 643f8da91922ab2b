use crate::errors::Result;
use crate::metals::StorePricingConfig;

use super::pricing_cache_model::PricingCacheSnapshot;

/// Key-value storage for pricing snapshots, keyed by store id.
///
/// Entries never expire; they live until overwritten or cleared.
pub trait PricingCacheStore: Send + Sync {
    fn get(&self, store_id: &str) -> Option<PricingCacheSnapshot>;

    /// Stores a snapshot, replacing any previous one (last write wins).
    fn set(&self, store_id: &str, snapshot: PricingCacheSnapshot);

    /// Removes the entry; returns whether one existed.
    fn clear(&self, store_id: &str) -> bool;
}

pub trait PricingCacheServiceTrait: Send + Sync {
    /// Computes fresh basis prices from history, ignoring any cached snapshot,
    /// and stores them for the config's store.
    fn update_cache(&self, config: &StorePricingConfig) -> Result<PricingCacheSnapshot>;

    fn load_cache(&self, store_id: &str) -> Option<PricingCacheSnapshot>;

    fn clear_cache(&self, store_id: &str) -> bool;
}
