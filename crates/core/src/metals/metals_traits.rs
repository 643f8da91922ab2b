//! Metal price repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::metals_model::{
    BackfillResult, BackfillStatus, MetalPriceRecord, MetalSyncResult, MetalType, PricingBasis,
    PurityPrice, ResolvedMetalPrice,
};
use crate::errors::Result;

/// Persistence for daily metal price history.
#[async_trait]
pub trait MetalPriceRepositoryTrait: Send + Sync {
    /// Inserts records, replacing any existing record for the same metal and date.
    ///
    /// Returns the number of rows written.
    async fn upsert_prices(&self, records: Vec<MetalPriceRecord>) -> Result<usize>;

    /// Most recent record for a metal dated on or before `as_of`.
    fn get_latest(&self, metal: MetalType, as_of: NaiveDate) -> Result<Option<MetalPriceRecord>>;

    /// Records for a metal dated on or after `since`, oldest first.
    fn get_since(&self, metal: MetalType, since: NaiveDate) -> Result<Vec<MetalPriceRecord>>;
}

#[async_trait]
pub trait MetalServiceTrait: Send + Sync {
    /// Fetches today's prices from the metals provider and stores them.
    async fn sync_metal_prices(&self) -> Result<MetalSyncResult>;

    /// Fetches and stores the trailing `days` of history.
    async fn backfill_price_history(&self, days: i64) -> Result<BackfillResult>;

    fn backfill_status(&self, days: i64) -> Result<Vec<BackfillStatus>>;

    fn latest_prices(&self) -> Result<Vec<MetalPriceRecord>>;

    fn price_history(&self, metal: MetalType, days: i64) -> Result<Vec<MetalPriceRecord>>;

    /// One aggregated record per metal with history, for the given basis.
    fn basis_prices(&self, basis: PricingBasis) -> Result<Vec<MetalPriceRecord>>;

    /// Discounted price per dwt of a metal/purity for a store.
    fn resolve_price(
        &self,
        store_id: &str,
        metal: MetalType,
        purity_label: &str,
    ) -> Result<ResolvedMetalPrice>;

    /// Resolved price for every purity grade of a metal.
    fn purity_prices(&self, store_id: &str, metal: MetalType) -> Result<Vec<PurityPrice>>;
}
