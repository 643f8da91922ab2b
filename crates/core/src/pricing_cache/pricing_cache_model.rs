use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::metals::{MetalPriceRecord, MetalType, PricingBasis};

/// Metal prices frozen at the moment a store saved its pricing settings.
///
/// While present, metal pricing for the store reads from here instead of the
/// price history, so one quote session sees one consistent set of prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingCacheSnapshot {
    pub pricing_basis: PricingBasis,
    pub discount_percent: Decimal,
    /// At most one record per metal, already aggregated for `pricing_basis`
    pub metal_prices: Vec<MetalPriceRecord>,
    pub last_updated: DateTime<Utc>,
}

impl PricingCacheSnapshot {
    pub fn price_for(&self, metal: MetalType) -> Option<&MetalPriceRecord> {
        self.metal_prices.iter().find(|r| r.metal_type == metal)
    }
}
