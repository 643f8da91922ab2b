use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use log::{debug, error, info};
use std::collections::BTreeSet;
use std::sync::Arc;
use wisebuy_market_data::MetalsPriceProvider;

use super::metals_model::{
    BackfillResult, BackfillStatus, MetalPriceRecord, MetalSyncResult, MetalType, PricingBasis,
    PurityPrice, ResolvedMetalPrice,
};
use super::metals_resolver::MetalPriceResolver;
use super::metals_traits::{MetalPriceRepositoryTrait, MetalServiceTrait};
use super::purity::purity_table;
use crate::constants::PRICING_CURRENCY;
use crate::errors::{Error, Result};
use crate::pricing_cache::PricingCacheStore;
use crate::settings::SettingsServiceTrait;
use crate::stores::StoreRepositoryTrait;

/// Longest history a single backfill may request
const MAX_BACKFILL_DAYS: i64 = 3650;

pub struct MetalService {
    repository: Arc<dyn MetalPriceRepositoryTrait>,
    provider: Arc<dyn MetalsPriceProvider>,
    store_repository: Arc<dyn StoreRepositoryTrait>,
    cache_store: Arc<dyn PricingCacheStore>,
    settings_service: Arc<dyn SettingsServiceTrait>,
}

impl MetalService {
    pub fn new(
        repository: Arc<dyn MetalPriceRepositoryTrait>,
        provider: Arc<dyn MetalsPriceProvider>,
        store_repository: Arc<dyn StoreRepositoryTrait>,
        cache_store: Arc<dyn PricingCacheStore>,
        settings_service: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        MetalService {
            repository,
            provider,
            store_repository,
            cache_store,
            settings_service,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn symbols() -> Vec<&'static str> {
        MetalType::ALL.iter().map(|m| m.code()).collect()
    }

    fn to_records(
        prices: Vec<wisebuy_market_data::MetalSpotPrice>,
    ) -> Result<Vec<MetalPriceRecord>> {
        prices
            .into_iter()
            .map(|p| {
                let metal: MetalType = p.symbol.parse()?;
                Ok(MetalPriceRecord::new(metal, p.date, p.price_per_ounce))
            })
            .collect()
    }

    fn validate_days(days: i64) -> Result<()> {
        if days < 1 || days > MAX_BACKFILL_DAYS {
            return Err(Error::invalid_input(format!(
                "days must be between 1 and {}",
                MAX_BACKFILL_DAYS
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MetalServiceTrait for MetalService {
    async fn sync_metal_prices(&self) -> Result<MetalSyncResult> {
        let symbols = Self::symbols();
        let fetched = self
            .provider
            .get_latest_prices(&symbols, PRICING_CURRENCY)
            .await;

        let prices = match fetched {
            Ok(prices) => prices,
            Err(e) => {
                error!("Metals price sync failed: {}", e);
                self.settings_service
                    .record_metals_sync(Utc::now(), &format!("error: {}", e))
                    .await?;
                return Err(e.into());
            }
        };

        let records = Self::to_records(prices)?;
        self.repository.upsert_prices(records.clone()).await?;

        let synced_at = Utc::now();
        self.settings_service
            .record_metals_sync(synced_at, "success")
            .await?;
        info!("Synced {} metal prices", records.len());

        Ok(MetalSyncResult { records, synced_at })
    }

    async fn backfill_price_history(&self, days: i64) -> Result<BackfillResult> {
        Self::validate_days(days)?;

        let end = Self::today();
        let start = end - Duration::days(days);
        let symbols = Self::symbols();

        let prices = self
            .provider
            .get_historical_prices(&symbols, PRICING_CURRENCY, start, end)
            .await
            .map_err(|e| {
                error!("Metals history backfill {}..{} failed: {}", start, end, e);
                Error::from(e)
            })?;

        let records = Self::to_records(prices)?;
        let records_written = self.repository.upsert_prices(records).await?;
        info!(
            "Backfilled {} metal price records over {} days",
            records_written, days
        );

        Ok(BackfillResult {
            days,
            records_written,
        })
    }

    fn backfill_status(&self, days: i64) -> Result<Vec<BackfillStatus>> {
        Self::validate_days(days)?;

        let today = Self::today();
        let since = today - Duration::days(days - 1);

        MetalType::ALL
            .iter()
            .map(|metal| {
                let history = self.repository.get_since(*metal, since)?;
                let dates: BTreeSet<NaiveDate> = history
                    .iter()
                    .map(|r| r.date)
                    .filter(|d| *d <= today)
                    .collect();
                let available_days = dates.len() as i64;
                Ok(BackfillStatus {
                    metal_type: *metal,
                    expected_days: days,
                    available_days,
                    missing_days: (days - available_days).max(0),
                    earliest_date: dates.iter().next().copied(),
                    latest_date: dates.iter().next_back().copied(),
                })
            })
            .collect()
    }

    fn latest_prices(&self) -> Result<Vec<MetalPriceRecord>> {
        let resolver = MetalPriceResolver::new(self.repository.as_ref());
        resolver.basis_prices(PricingBasis::Yeob, Self::today())
    }

    fn price_history(&self, metal: MetalType, days: i64) -> Result<Vec<MetalPriceRecord>> {
        Self::validate_days(days)?;
        self.repository
            .get_since(metal, Self::today() - Duration::days(days))
    }

    fn basis_prices(&self, basis: PricingBasis) -> Result<Vec<MetalPriceRecord>> {
        let resolver = MetalPriceResolver::new(self.repository.as_ref());
        resolver.basis_prices(basis, Self::today())
    }

    fn resolve_price(
        &self,
        store_id: &str,
        metal: MetalType,
        purity_label: &str,
    ) -> Result<ResolvedMetalPrice> {
        let config = self.store_repository.get_by_id(store_id)?.pricing_config();
        let cache = self.cache_store.get(store_id);
        debug!(
            "Resolving {} {} for store {} (cached: {})",
            metal,
            purity_label,
            store_id,
            cache.is_some()
        );

        let resolver = MetalPriceResolver::new(self.repository.as_ref());
        resolver.resolve(metal, purity_label, &config, cache.as_ref(), Self::today())
    }

    fn purity_prices(&self, store_id: &str, metal: MetalType) -> Result<Vec<PurityPrice>> {
        let config = self.store_repository.get_by_id(store_id)?.pricing_config();
        let cache = self.cache_store.get(store_id);
        let resolver = MetalPriceResolver::new(self.repository.as_ref());
        let today = Self::today();

        purity_table(metal)
            .iter()
            .map(|purity| {
                let resolved =
                    resolver.resolve(metal, purity.label, &config, cache.as_ref(), today)?;
                Ok(PurityPrice {
                    label: resolved.purity_label,
                    fraction_of_pure: resolved.fraction_of_pure,
                    price_per_dwt: resolved.price_per_dwt,
                })
            })
            .collect()
    }
}
