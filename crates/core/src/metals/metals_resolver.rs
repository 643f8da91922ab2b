//! Metal price resolution.
//!
//! A store's price for a metal/purity is derived in three steps:
//! 1. pick a base price per ounce (cache snapshot, or history aggregated for
//!    the store's pricing basis),
//! 2. convert to pennyweight and scale by the purity's fraction of pure metal,
//! 3. take the store's discount off.
//!
//! Missing history is not an error: the price resolves to zero and the caller
//! offers manual entry.

use chrono::{Duration, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use super::metals_model::{
    MetalPriceRecord, MetalPriceSource, MetalType, PricingBasis, ResolvedMetalPrice,
    StorePricingConfig,
};
use super::metals_traits::MetalPriceRepositoryTrait;
use super::purity::find_purity;
use crate::errors::{Error, Result};
use crate::pricing_cache::PricingCacheSnapshot;

/// `price_per_dwt * fraction * (1 - discount/100)`
pub fn discounted_price(
    price_per_dwt: Decimal,
    fraction_of_pure: Decimal,
    discount_percent: Decimal,
) -> Result<Decimal> {
    Decimal::ONE
        .checked_sub(discount_percent / Decimal::ONE_HUNDRED)
        .and_then(|keep| price_per_dwt.checked_mul(fraction_of_pure)?.checked_mul(keep))
        .ok_or_else(|| Error::invalid_input("Metal price is too large to discount"))
}

/// Aggregates one metal's history into the record used as its current price.
///
/// YEOB takes the most recent record dated on or before `as_of`. Averages take the mean price per ounce
/// of records dated within the trailing window ending at `as_of`; a window
/// with fewer days than its length averages what is there, an empty window
/// yields `None`.
pub fn aggregate_history(
    metal: MetalType,
    history: &[MetalPriceRecord],
    basis: PricingBasis,
    as_of: NaiveDate,
) -> Option<MetalPriceRecord> {
    let records = history.iter().filter(|r| r.metal_type == metal);

    match basis.window_days() {
        None => records.filter(|r| r.date <= as_of).max_by_key(|r| r.date).cloned(),
        Some(days) => {
            let window_start = as_of - Duration::days(days);
            let in_window: Vec<&MetalPriceRecord> = records
                .filter(|r| r.date >= window_start && r.date <= as_of)
                .collect();
            let latest = in_window.iter().map(|r| r.date).max()?;
            let sum: Decimal = in_window.iter().map(|r| r.price_per_ounce).sum();
            let mean = sum / Decimal::from(in_window.len());
            Some(MetalPriceRecord::new(metal, latest, mean))
        }
    }
}

/// Resolves metal prices against stored history.
pub struct MetalPriceResolver<'a> {
    repository: &'a dyn MetalPriceRepositoryTrait,
}

impl<'a> MetalPriceResolver<'a> {
    pub fn new(repository: &'a dyn MetalPriceRepositoryTrait) -> Self {
        Self { repository }
    }

    /// Current price record of one metal for a basis, read from history.
    pub fn basis_price(
        &self,
        metal: MetalType,
        basis: PricingBasis,
        as_of: NaiveDate,
    ) -> Result<Option<MetalPriceRecord>> {
        match basis.window_days() {
            None => self.repository.get_latest(metal, as_of),
            Some(days) => {
                let history = self
                    .repository
                    .get_since(metal, as_of - Duration::days(days))?;
                Ok(aggregate_history(metal, &history, basis, as_of))
            }
        }
    }

    /// Current price record for every metal that has history.
    pub fn basis_prices(
        &self,
        basis: PricingBasis,
        as_of: NaiveDate,
    ) -> Result<Vec<MetalPriceRecord>> {
        let mut prices = Vec::with_capacity(MetalType::ALL.len());
        for metal in MetalType::ALL {
            match self.basis_price(metal, basis, as_of)? {
                Some(record) => prices.push(record),
                None => debug!("No {} price history for basis {}", metal, basis),
            }
        }
        Ok(prices)
    }

    /// Resolves the discounted price per dwt for a metal and purity.
    ///
    /// A cache snapshot holding the metal wins over history, together with
    /// the discount it was taken with.
    pub fn resolve(
        &self,
        metal: MetalType,
        purity_label: &str,
        config: &StorePricingConfig,
        cache: Option<&PricingCacheSnapshot>,
        as_of: NaiveDate,
    ) -> Result<ResolvedMetalPrice> {
        let purity = find_purity(metal, purity_label)?;

        let (base_price_per_dwt, discount_percent, source) =
            match cache.and_then(|c| c.price_for(metal).map(|r| (c, r))) {
                Some((snapshot, record)) => (
                    record.price_per_dwt,
                    snapshot.discount_percent,
                    MetalPriceSource::Cache,
                ),
                None => match self.basis_price(metal, config.pricing_basis, as_of)? {
                    Some(record) => (
                        record.price_per_dwt,
                        config.discount_percent,
                        MetalPriceSource::History,
                    ),
                    None => (
                        Decimal::ZERO,
                        config.discount_percent,
                        MetalPriceSource::Unavailable,
                    ),
                },
            };

        Ok(ResolvedMetalPrice {
            metal_type: metal,
            purity_label: purity.label.to_string(),
            fraction_of_pure: purity.fraction_of_pure,
            base_price_per_dwt,
            discount_percent,
            price_per_dwt: discounted_price(
                base_price_per_dwt,
                purity.fraction_of_pure,
                discount_percent,
            )?,
            source,
        })
    }
}
