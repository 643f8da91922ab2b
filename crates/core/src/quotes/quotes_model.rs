//! Quote domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::quotes_calculator::{
    center_stone_value, item_total, melee_value, metal_value, total_quote_value,
};
use crate::diamonds::PricingSource;
use crate::errors::{Error, Result, ValidationError};
use crate::metals::{find_purity, MetalType};

/// A priced center stone. `value = carat * price_per_carat * (1 - percent_off/100)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterStone {
    pub shape: String,
    pub color: String,
    pub clarity: String,
    pub carat: Decimal,
    pub price_per_carat: Decimal,
    pub pricing_source: PricingSource,
    pub percent_off: Decimal,
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading_lab: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inscription: Option<String>,
}

impl CenterStone {
    pub fn recompute(&mut self) -> Result<()> {
        self.value = center_stone_value(self.carat, self.price_per_carat, self.percent_off)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.carat <= Decimal::ZERO {
            return Err(Error::invalid_input("Center stone carat must be positive"));
        }
        if self.price_per_carat.is_sign_negative() {
            return Err(Error::invalid_input("Price per carat cannot be negative"));
        }
        if self.percent_off < Decimal::ZERO || self.percent_off > Decimal::ONE_HUNDRED {
            return Err(Error::invalid_input(
                "Percent off must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

/// A group of melee stones priced per point. `value = total_carat * 100 * price_per_point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeleeGroup {
    pub shape: String,
    pub color: String,
    pub clarity: String,
    pub count: u32,
    pub total_carat: Decimal,
    pub price_per_point: Decimal,
    pub value: Decimal,
}

impl MeleeGroup {
    pub fn new(
        shape: String,
        color: String,
        clarity: String,
        count: u32,
        total_carat: Decimal,
        price_per_point: Decimal,
    ) -> Result<Self> {
        Ok(MeleeGroup {
            value: melee_value(total_carat, price_per_point)?,
            shape,
            color,
            clarity,
            count,
            total_carat,
            price_per_point,
        })
    }

    pub fn recompute(&mut self) -> Result<()> {
        self.value = melee_value(self.total_carat, self.price_per_point)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.total_carat.is_sign_negative() || self.price_per_point.is_sign_negative() {
            return Err(Error::invalid_input(
                "Melee carat weight and price per point cannot be negative",
            ));
        }
        Ok(())
    }
}

/// A finalized line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub id: String,
    pub description: String,
    pub metal_type: MetalType,
    pub metal_color: Option<String>,
    pub purity: String,
    pub weight_dwt: Decimal,
    pub price_per_dwt: Decimal,
    pub metal_value: Decimal,
    pub center_stones: Vec<CenterStone>,
    pub melee_groups: Vec<MeleeGroup>,
    pub total_value: Decimal,
}

impl QuoteItem {
    /// Recomputes every derived value from the item's inputs.
    pub fn recompute(&mut self) -> Result<()> {
        for stone in &mut self.center_stones {
            stone.recompute()?;
        }
        for group in &mut self.melee_groups {
            group.recompute()?;
        }
        self.metal_value = metal_value(self.weight_dwt, self.price_per_dwt)?;
        self.total_value = item_total(
            self.metal_value,
            self.center_stones.iter().map(|s| s.value),
            self.melee_groups.iter().map(|g| g.value),
        )?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.weight_dwt.is_sign_negative() {
            return Err(Error::invalid_input("Metal weight cannot be negative"));
        }
        if self.price_per_dwt.is_sign_negative() {
            return Err(Error::invalid_input("Metal price cannot be negative"));
        }
        find_purity(self.metal_type, &self.purity)?;
        for stone in &self.center_stones {
            stone.validate()?;
        }
        for group in &self.melee_groups {
            group.validate()?;
        }
        Ok(())
    }
}

/// An item under capture. Fields are filled in as the operator moves through
/// the capture steps; [`QuoteItemDraft::finalize`] freezes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemDraft {
    pub description: String,
    pub metal_type: Option<MetalType>,
    pub metal_color: Option<String>,
    pub purity: Option<String>,
    pub weight_dwt: Decimal,
    pub price_per_dwt: Decimal,
    pub center_stones: Vec<CenterStone>,
    pub melee_groups: Vec<MeleeGroup>,
}

impl QuoteItemDraft {
    pub fn new(description: impl Into<String>) -> Self {
        QuoteItemDraft {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn set_metal(&mut self, metal_type: MetalType, metal_color: Option<String>, purity: &str) {
        self.metal_type = Some(metal_type);
        self.metal_color = metal_color;
        self.purity = Some(purity.to_string());
    }

    pub fn set_weight(&mut self, weight_dwt: Decimal) {
        self.weight_dwt = weight_dwt;
    }

    pub fn set_metal_price(&mut self, price_per_dwt: Decimal) {
        self.price_per_dwt = price_per_dwt;
    }

    pub fn add_center_stone(&mut self, mut stone: CenterStone) -> Result<()> {
        stone.recompute()?;
        self.center_stones.push(stone);
        Ok(())
    }

    pub fn add_melee_group(&mut self, mut group: MeleeGroup) -> Result<()> {
        group.recompute()?;
        self.melee_groups.push(group);
        Ok(())
    }

    pub fn metal_value(&self) -> Result<Decimal> {
        metal_value(self.weight_dwt, self.price_per_dwt)
    }

    /// Running total of the item as captured so far.
    pub fn total_value(&self) -> Result<Decimal> {
        item_total(
            self.metal_value()?,
            self.center_stones.iter().map(|s| s.value),
            self.melee_groups.iter().map(|g| g.value),
        )
    }

    /// Produces the immutable item with a fresh id and computed totals.
    pub fn finalize(self) -> Result<QuoteItem> {
        let metal_type = self.metal_type.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("metalType".to_string()))
        })?;
        let purity = self
            .purity
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("purity".to_string())))?;

        let mut item = QuoteItem {
            id: Uuid::new_v4().to_string(),
            description: self.description.trim().to_string(),
            metal_type,
            metal_color: self.metal_color,
            purity,
            weight_dwt: self.weight_dwt,
            price_per_dwt: self.price_per_dwt,
            metal_value: Decimal::ZERO,
            center_stones: self.center_stones,
            melee_groups: self.melee_groups,
            total_value: Decimal::ZERO,
        };
        item.validate()?;
        item.recompute()?;
        Ok(item)
    }
}

/// Quote under construction: an ordered list of finalized items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    items: Vec<QuoteItem>,
    total_value: Decimal,
}

impl QuoteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item and recomputes the total. Earlier items are untouched.
    /// An item that would push the total out of range is not added.
    pub fn add_item(&mut self, item: QuoteItem) -> Result<()> {
        self.items.push(item);
        match total_quote_value(&self.items) {
            Ok(total) => {
                self.total_value = total;
                Ok(())
            }
            Err(err) => {
                self.items.pop();
                Err(err)
            }
        }
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops all items, ready for the next customer.
    pub fn reset(&mut self) {
        self.items.clear();
        self.total_value = Decimal::ZERO;
    }

    pub fn into_new_quote(self, customer: CustomerInfo) -> NewQuote {
        NewQuote {
            customer,
            items: self.items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Completed,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Completed => "completed",
        }
    }
}

/// A saved purchase offer. There is no update path once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub store_id: String,
    pub customer: CustomerInfo,
    pub items: Vec<QuoteItem>,
    pub total_value: Decimal,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

/// Input model for saving a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub customer: CustomerInfo,
    pub items: Vec<QuoteItem>,
}

impl NewQuote {
    pub fn validate(&self) -> Result<()> {
        if self.customer.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "customer.name".to_string(),
            )));
        }
        if self.items.is_empty() {
            return Err(Error::invalid_input("A quote needs at least one item"));
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }
}

/// Capture-step input for pricing one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemRequest {
    #[serde(default)]
    pub description: String,
    pub metal_type: MetalType,
    #[serde(default)]
    pub metal_color: Option<String>,
    pub purity: String,
    pub weight_dwt: Decimal,
    /// Operator override of the resolved metal price
    #[serde(default)]
    pub manual_price_per_dwt: Option<Decimal>,
    #[serde(default)]
    pub center_stones: Vec<CenterStoneRequest>,
    #[serde(default)]
    pub melee_groups: Vec<MeleeGroupRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterStoneRequest {
    pub shape: String,
    pub color: String,
    pub clarity: String,
    pub carat: Decimal,
    #[serde(default)]
    pub percent_off: Decimal,
    /// Price typed in by the operator; skips resolution
    #[serde(default)]
    pub manual_price_per_carat: Option<Decimal>,
    #[serde(default)]
    pub cut: Option<String>,
    #[serde(default)]
    pub grading_lab: Option<String>,
    #[serde(default)]
    pub inscription: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeleeGroupRequest {
    pub shape: String,
    pub color: String,
    pub clarity: String,
    pub count: u32,
    pub total_carat: Decimal,
    pub price_per_point: Decimal,
}

/// A resolver message attached to a priced item, e.g. a stone that needs a
/// manual price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingNotice {
    /// `metal` or `centerStones[i]`
    pub target: String,
    pub message: String,
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub is_expired: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub item: QuoteItem,
    pub notices: Vec<PricingNotice>,
}
