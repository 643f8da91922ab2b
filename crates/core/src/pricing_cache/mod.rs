//! Pricing cache module - per-store snapshots of resolved metal prices.

mod pricing_cache_model;
mod pricing_cache_service;
mod pricing_cache_traits;

pub use pricing_cache_model::PricingCacheSnapshot;
pub use pricing_cache_service::{InMemoryPricingCache, PricingCacheService};
pub use pricing_cache_traits::{PricingCacheServiceTrait, PricingCacheStore};
