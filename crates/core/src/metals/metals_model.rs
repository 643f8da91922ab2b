//! Metal pricing domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DWT_PER_TROY_OUNCE;
use crate::errors::{Error, Result};

/// Precious metals priced by the engine, keyed by their commodity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetalType {
    #[serde(rename = "XAU")]
    Xau,
    #[serde(rename = "XAG")]
    Xag,
    #[serde(rename = "XPT")]
    Xpt,
    #[serde(rename = "XPD")]
    Xpd,
}

impl MetalType {
    pub const ALL: [MetalType; 4] = [MetalType::Xau, MetalType::Xag, MetalType::Xpt, MetalType::Xpd];

    pub fn code(&self) -> &'static str {
        match self {
            MetalType::Xau => "XAU",
            MetalType::Xag => "XAG",
            MetalType::Xpt => "XPT",
            MetalType::Xpd => "XPD",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MetalType::Xau => "Gold",
            MetalType::Xag => "Silver",
            MetalType::Xpt => "Platinum",
            MetalType::Xpd => "Palladium",
        }
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Accepts either the commodity code or the metal name, case-insensitively.
impl FromStr for MetalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xau" | "gold" => Ok(MetalType::Xau),
            "xag" | "silver" => Ok(MetalType::Xag),
            "xpt" | "platinum" => Ok(MetalType::Xpt),
            "xpd" | "palladium" => Ok(MetalType::Xpd),
            _ => Err(Error::invalid_input(format!("Unknown metal type '{}'", s))),
        }
    }
}

/// One day's price for a metal.
///
/// `price_per_dwt` is always `price_per_ounce / 20`; build records through
/// [`MetalPriceRecord::new`] to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalPriceRecord {
    pub metal_type: MetalType,
    pub date: NaiveDate,
    pub price_per_ounce: Decimal,
    pub price_per_dwt: Decimal,
}

impl MetalPriceRecord {
    pub fn new(metal_type: MetalType, date: NaiveDate, price_per_ounce: Decimal) -> Self {
        Self {
            metal_type,
            date,
            price_per_ounce,
            price_per_dwt: price_per_ounce / DWT_PER_TROY_OUNCE,
        }
    }
}

/// Which aggregation of price history yields a metal's current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PricingBasis {
    /// Yesterday end of business: the latest recorded price
    #[default]
    #[serde(rename = "YEOB")]
    Yeob,
    #[serde(rename = "90_days")]
    NinetyDayAvg,
    #[serde(rename = "180_days")]
    OneEightyDayAvg,
}

impl PricingBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingBasis::Yeob => "YEOB",
            PricingBasis::NinetyDayAvg => "90_days",
            PricingBasis::OneEightyDayAvg => "180_days",
        }
    }

    /// Length of the trailing averaging window, `None` for YEOB.
    pub fn window_days(&self) -> Option<i64> {
        match self {
            PricingBasis::Yeob => None,
            PricingBasis::NinetyDayAvg => Some(90),
            PricingBasis::OneEightyDayAvg => Some(180),
        }
    }
}

impl fmt::Display for PricingBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingBasis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "YEOB" => Ok(PricingBasis::Yeob),
            "90_days" => Ok(PricingBasis::NinetyDayAvg),
            "180_days" => Ok(PricingBasis::OneEightyDayAvg),
            _ => Err(Error::invalid_input(format!("Unknown pricing basis '{}'", s))),
        }
    }
}

/// The pricing inputs a store controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePricingConfig {
    pub store_id: String,
    pub pricing_basis: PricingBasis,
    /// Percentage in `[0, 100]` taken off the pure metal price
    pub discount_percent: Decimal,
}

/// Where a resolved metal price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalPriceSource {
    /// The store's pricing cache snapshot
    Cache,
    /// Computed from price history for the store's basis
    History,
    /// No history exists for the metal
    Unavailable,
}

/// Outcome of resolving a metal/purity price for a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetalPrice {
    pub metal_type: MetalType,
    pub purity_label: String,
    pub fraction_of_pure: Decimal,
    /// Pure metal price per dwt before purity and discount
    pub base_price_per_dwt: Decimal,
    pub discount_percent: Decimal,
    /// Final price per dwt; zero means no data
    pub price_per_dwt: Decimal,
    pub source: MetalPriceSource,
}

impl ResolvedMetalPrice {
    pub fn is_priced(&self) -> bool {
        self.source != MetalPriceSource::Unavailable
    }
}

/// Discounted price per dwt for one purity of a metal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurityPrice {
    pub label: String,
    pub fraction_of_pure: Decimal,
    pub price_per_dwt: Decimal,
}

/// History coverage for one metal over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillStatus {
    pub metal_type: MetalType,
    pub expected_days: i64,
    pub available_days: i64,
    pub missing_days: i64,
    pub earliest_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
}

/// Result of a latest-price sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalSyncResult {
    pub records: Vec<MetalPriceRecord>,
    pub synced_at: DateTime<Utc>,
}

/// Result of a history backfill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillResult {
    pub days: i64,
    pub records_written: usize,
}
