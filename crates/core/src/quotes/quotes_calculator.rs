//! Value calculators. Pure functions, no rounding: totals are exact sums of
//! their parts. Every product and sum is checked, so an out-of-range input is
//! a validation error instead of a panic.

use rust_decimal::Decimal;

use crate::constants::POINTS_PER_CARAT;
use crate::errors::{Error, Result};

use super::quotes_model::QuoteItem;

fn too_large(what: &str) -> Error {
    Error::invalid_input(format!("{} is too large to price", what))
}

fn checked_sum(
    start: Decimal,
    values: impl IntoIterator<Item = Decimal>,
    what: &str,
) -> Result<Decimal> {
    values.into_iter().try_fold(start, |acc, value| {
        acc.checked_add(value).ok_or_else(|| too_large(what))
    })
}

/// `weight_dwt * price_per_dwt`
pub fn metal_value(weight_dwt: Decimal, price_per_dwt: Decimal) -> Result<Decimal> {
    weight_dwt
        .checked_mul(price_per_dwt)
        .ok_or_else(|| too_large("Metal value"))
}

/// `carat * price_per_carat * (1 - percent_off/100)`
pub fn center_stone_value(
    carat: Decimal,
    price_per_carat: Decimal,
    percent_off: Decimal,
) -> Result<Decimal> {
    let keep = Decimal::ONE
        .checked_sub(percent_off / Decimal::ONE_HUNDRED)
        .ok_or_else(|| too_large("Percent off"))?;
    carat
        .checked_mul(price_per_carat)
        .and_then(|gross| gross.checked_mul(keep))
        .ok_or_else(|| too_large("Center stone value"))
}

/// `total_carat * 100 * price_per_point`
pub fn melee_value(total_carat: Decimal, price_per_point: Decimal) -> Result<Decimal> {
    total_carat
        .checked_mul(POINTS_PER_CARAT)
        .and_then(|points| points.checked_mul(price_per_point))
        .ok_or_else(|| too_large("Melee value"))
}

/// Metal value plus every stone and melee value.
pub fn item_total(
    metal_value: Decimal,
    stone_values: impl IntoIterator<Item = Decimal>,
    melee_values: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal> {
    let with_stones = checked_sum(metal_value, stone_values, "Item total")?;
    checked_sum(with_stones, melee_values, "Item total")
}

pub fn total_quote_value(items: &[QuoteItem]) -> Result<Decimal> {
    checked_sum(
        Decimal::ZERO,
        items.iter().map(|item| item.total_value),
        "Quote total",
    )
}
