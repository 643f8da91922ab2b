use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metal symbols the buy-quote engine prices (ISO 4217 commodity codes).
pub const SUPPORTED_METALS: &[&str] = &["XAU", "XAG", "XPT", "XPD"];

/// Price of one troy ounce of a metal on a given day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetalSpotPrice {
    /// Metal symbol (XAU, XAG, XPT, XPD)
    pub symbol: String,

    /// Trading day the price belongs to
    pub date: NaiveDate,

    /// Price of one troy ounce in `currency`
    pub price_per_ounce: Decimal,

    /// Quote currency
    pub currency: String,

    /// Provider id that produced the price
    pub source: String,
}
