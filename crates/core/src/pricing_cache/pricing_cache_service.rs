use chrono::Utc;
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

use super::pricing_cache_model::PricingCacheSnapshot;
use super::pricing_cache_traits::{PricingCacheServiceTrait, PricingCacheStore};
use crate::errors::Result;
use crate::metals::{MetalPriceRepositoryTrait, MetalPriceResolver, StorePricingConfig};

/// Process-local pricing cache.
#[derive(Default)]
pub struct InMemoryPricingCache {
    entries: DashMap<String, PricingCacheSnapshot>,
}

impl InMemoryPricingCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PricingCacheStore for InMemoryPricingCache {
    fn get(&self, store_id: &str) -> Option<PricingCacheSnapshot> {
        self.entries.get(store_id).map(|entry| entry.value().clone())
    }

    fn set(&self, store_id: &str, snapshot: PricingCacheSnapshot) {
        self.entries.insert(store_id.to_string(), snapshot);
    }

    fn clear(&self, store_id: &str) -> bool {
        self.entries.remove(store_id).is_some()
    }
}

pub struct PricingCacheService {
    metal_repository: Arc<dyn MetalPriceRepositoryTrait>,
    cache_store: Arc<dyn PricingCacheStore>,
}

impl PricingCacheService {
    pub fn new(
        metal_repository: Arc<dyn MetalPriceRepositoryTrait>,
        cache_store: Arc<dyn PricingCacheStore>,
    ) -> Self {
        PricingCacheService {
            metal_repository,
            cache_store,
        }
    }
}

impl PricingCacheServiceTrait for PricingCacheService {
    fn update_cache(&self, config: &StorePricingConfig) -> Result<PricingCacheSnapshot> {
        let now = Utc::now();
        let resolver = MetalPriceResolver::new(self.metal_repository.as_ref());
        let metal_prices = resolver.basis_prices(config.pricing_basis, now.date_naive())?;

        let snapshot = PricingCacheSnapshot {
            pricing_basis: config.pricing_basis,
            discount_percent: config.discount_percent,
            metal_prices,
            last_updated: now,
        };
        debug!(
            "Pricing cache for store {} refreshed with {} metals",
            config.store_id,
            snapshot.metal_prices.len()
        );
        self.cache_store.set(&config.store_id, snapshot.clone());
        Ok(snapshot)
    }

    fn load_cache(&self, store_id: &str) -> Option<PricingCacheSnapshot> {
        self.cache_store.get(store_id)
    }

    fn clear_cache(&self, store_id: &str) -> bool {
        self.cache_store.clear(store_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metals::{MetalPriceRecord, MetalType, PricingBasis};
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct MockHistory {
        records: Mutex<Vec<MetalPriceRecord>>,
    }

    #[async_trait]
    impl MetalPriceRepositoryTrait for MockHistory {
        async fn upsert_prices(&self, records: Vec<MetalPriceRecord>) -> Result<usize> {
            let count = records.len();
            self.records.lock().unwrap().extend(records);
            Ok(count)
        }

        fn get_latest(
            &self,
            metal: MetalType,
            as_of: NaiveDate,
        ) -> Result<Option<MetalPriceRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.metal_type == metal && r.date <= as_of)
                .max_by_key(|r| r.date)
                .cloned())
        }

        fn get_since(&self, metal: MetalType, since: NaiveDate) -> Result<Vec<MetalPriceRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.metal_type == metal && r.date >= since)
                .cloned()
                .collect())
        }
    }

    fn service_with(records: Vec<MetalPriceRecord>) -> (PricingCacheService, Arc<MockHistory>) {
        let history = Arc::new(MockHistory {
            records: Mutex::new(records),
        });
        let service =
            PricingCacheService::new(history.clone(), Arc::new(InMemoryPricingCache::new()));
        (service, history)
    }

    fn config(store_id: &str) -> StorePricingConfig {
        StorePricingConfig {
            store_id: store_id.to_string(),
            pricing_basis: PricingBasis::Yeob,
            discount_percent: dec!(10),
        }
    }

    #[test]
    fn test_update_then_load_returns_snapshot() {
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let (service, _) = service_with(vec![
            MetalPriceRecord::new(MetalType::Xau, yesterday, dec!(2000)),
            MetalPriceRecord::new(MetalType::Xag, yesterday, dec!(25)),
        ]);

        assert!(service.load_cache("store-1").is_none());
        let snapshot = service.update_cache(&config("store-1")).unwrap();
        assert_eq!(snapshot.metal_prices.len(), 2);
        assert_eq!(snapshot.discount_percent, dec!(10));

        let loaded = service.load_cache("store-1").unwrap();
        assert_eq!(loaded, snapshot);
        assert!(service.load_cache("store-2").is_none());
    }

    #[tokio::test]
    async fn test_snapshot_is_frozen_until_refreshed() {
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let (service, history) = service_with(vec![MetalPriceRecord::new(
            MetalType::Xau,
            yesterday,
            dec!(2000),
        )]);
        service.update_cache(&config("store-1")).unwrap();

        history
            .upsert_prices(vec![MetalPriceRecord::new(
                MetalType::Xau,
                Utc::now().date_naive(),
                dec!(2400),
            )])
            .await
            .unwrap();

        let cached = service.load_cache("store-1").unwrap();
        assert_eq!(
            cached.price_for(MetalType::Xau).unwrap().price_per_ounce,
            dec!(2000)
        );

        let refreshed = service.update_cache(&config("store-1")).unwrap();
        assert_eq!(
            refreshed.price_for(MetalType::Xau).unwrap().price_per_ounce,
            dec!(2400)
        );
    }

    #[test]
    fn test_clear_cache() {
        let (service, _) = service_with(vec![]);
        service.update_cache(&config("store-1")).unwrap();
        assert!(service.clear_cache("store-1"));
        assert!(!service.clear_cache("store-1"));
        assert!(service.load_cache("store-1").is_none());
    }
}
