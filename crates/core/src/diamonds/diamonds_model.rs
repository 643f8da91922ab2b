//! Diamond pricing domain models.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use wisebuy_market_data::PriceListKind;

use crate::constants::VENDOR_LIST_MAX_AGE_DAYS;
use crate::errors::{Error, Result};

/// Shape code of round brilliants; every other code prices from the fancy list.
pub const ROUND_SHAPE_CODE: &str = "BR";

/// Which price table a shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Round,
    Fancy,
}

impl ShapeType {
    pub const ALL: [ShapeType; 2] = [ShapeType::Round, ShapeType::Fancy];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Round => "round",
            ShapeType::Fancy => "fancy",
        }
    }

    pub fn for_shape(shape: &str) -> Self {
        if shape_code(shape) == ROUND_SHAPE_CODE {
            ShapeType::Round
        } else {
            ShapeType::Fancy
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round" => Ok(ShapeType::Round),
            "fancy" => Ok(ShapeType::Fancy),
            _ => Err(Error::invalid_input(format!(
                "Shape type must be 'round' or 'fancy', got '{}'",
                s
            ))),
        }
    }
}

impl From<ShapeType> for PriceListKind {
    fn from(shape_type: ShapeType) -> Self {
        match shape_type {
            ShapeType::Round => PriceListKind::Round,
            ShapeType::Fancy => PriceListKind::Fancy,
        }
    }
}

/// Maps a shape name to its price-list code. Codes pass through upper-cased.
pub fn shape_code(shape: &str) -> String {
    let normalized = shape.trim().to_ascii_lowercase();
    let code = match normalized.as_str() {
        "round" => "BR",
        "princess" => "PR",
        "emerald" => "EM",
        "asscher" => "AS",
        "oval" => "OV",
        "radiant" => "RA",
        "cushion" => "CU",
        "pear" => "PE",
        "heart" => "HE",
        "marquise" => "MQ",
        _ => return normalized.to_ascii_uppercase(),
    };
    code.to_string()
}

/// `min < carat <= max`: the lower bound is exclusive so a carat weight on a
/// boundary belongs to exactly one of two adjacent ranges.
pub fn carat_in_range(carat: Decimal, carat_min: Decimal, carat_max: Decimal) -> bool {
    carat > carat_min && carat <= carat_max
}

/// The stone being priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiamondSpecs {
    pub shape: String,
    pub color: String,
    pub clarity: String,
    pub carat: Decimal,
}

impl DiamondSpecs {
    pub fn shape_type(&self) -> ShapeType {
        ShapeType::for_shape(&self.shape)
    }

    pub fn validate(&self) -> Result<()> {
        if self.carat <= Decimal::ZERO {
            return Err(Error::invalid_input("Carat weight must be positive"));
        }
        if self.color.trim().is_empty() || self.clarity.trim().is_empty() {
            return Err(Error::invalid_input("Color and clarity are required"));
        }
        Ok(())
    }
}

/// A row of an uploaded price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiamondPriceEntry {
    pub id: String,
    pub shape_code: String,
    pub shape_type: ShapeType,
    pub color: String,
    pub clarity: String,
    pub carat_min: Decimal,
    pub carat_max: Decimal,
    pub price_per_carat: Decimal,
    pub created_at: DateTime<Utc>,
}

impl DiamondPriceEntry {
    pub fn matches(&self, specs: &DiamondSpecs) -> bool {
        self.shape_code == shape_code(&specs.shape)
            && self.color == specs.color
            && self.clarity == specs.clarity
            && carat_in_range(specs.carat, self.carat_min, self.carat_max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiamondPriceEntry {
    pub shape_code: String,
    pub shape_type: ShapeType,
    pub color: String,
    pub clarity: String,
    pub carat_min: Decimal,
    pub carat_max: Decimal,
    pub price_per_carat: Decimal,
}

/// Where a diamond price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingSource {
    DevCsv,
    Rapaport,
    Manual,
    NotFound,
}

impl PricingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingSource::DevCsv => "dev_csv",
            PricingSource::Rapaport => "rapaport",
            PricingSource::Manual => "manual",
            PricingSource::NotFound => "not_found",
        }
    }
}

/// Outcome of diamond price resolution. A `None` price is not an error: the
/// flags tell the operator whether to reconnect, refresh or type a price in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiamondPriceResult {
    pub price_per_carat: Option<Decimal>,
    pub source: PricingSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub is_expired: bool,
}

impl DiamondPriceResult {
    pub fn priced(price_per_carat: Decimal, source: PricingSource) -> Self {
        Self {
            price_per_carat: Some(price_per_carat),
            source,
            error: None,
            requires_auth: false,
            is_expired: false,
        }
    }

    pub fn not_found(message: String) -> Self {
        Self {
            price_per_carat: None,
            source: PricingSource::NotFound,
            error: Some(message),
            requires_auth: false,
            is_expired: false,
        }
    }

    pub fn expired(message: &str) -> Self {
        Self {
            price_per_carat: None,
            source: PricingSource::Manual,
            error: Some(message.to_string()),
            requires_auth: false,
            is_expired: true,
        }
    }

    pub fn requires_auth(message: &str) -> Self {
        Self {
            price_per_carat: None,
            source: PricingSource::Manual,
            error: Some(message.to_string()),
            requires_auth: true,
            is_expired: false,
        }
    }
}

/// A vendor price list downloaded for a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPriceList {
    pub store_id: String,
    pub list_type: ShapeType,
    pub fetched_at: DateTime<Utc>,
    /// Rows as delivered: either an array or an object with a `data` array
    pub content: Value,
}

impl VendorPriceList {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.fetched_at > Duration::days(VENDOR_LIST_MAX_AGE_DAYS)
    }

    pub fn rows(&self) -> &[Value] {
        match &self.content {
            Value::Array(rows) => rows.as_slice(),
            Value::Object(map) => match map.get("data") {
                Some(Value::Array(rows)) => rows.as_slice(),
                _ => &[],
            },
            _ => &[],
        }
    }

    /// Price per carat of the first row matching the specs.
    pub fn find_price(&self, specs: &DiamondSpecs) -> Option<Decimal> {
        self.rows()
            .iter()
            .filter_map(VendorRow::from_value)
            .find(|row| row.matches(specs))
            .map(|row| row.price_per_carat)
    }
}

/// A vendor row read leniently: field names come in snake, camel or Pascal
/// case and numbers may arrive as strings.
#[derive(Debug, Clone, PartialEq)]
struct VendorRow {
    color: String,
    clarity: String,
    carat_min: Decimal,
    carat_max: Decimal,
    price_per_carat: Decimal,
}

impl VendorRow {
    fn from_value(value: &Value) -> Option<Self> {
        let row = value.as_object()?;
        let field = |names: &[&str]| names.iter().find_map(|n| row.get(*n));

        Some(VendorRow {
            color: as_text(field(&["color", "Color"])?)?,
            clarity: as_text(field(&["clarity", "Clarity"])?)?,
            carat_min: field(&["carat_min", "caratMin", "CaratMin"])
                .and_then(as_decimal)
                .unwrap_or(Decimal::ZERO),
            carat_max: field(&["carat_max", "caratMax", "CaratMax"])
                .and_then(as_decimal)
                .unwrap_or(Decimal::from(999)),
            price_per_carat: as_decimal(field(&[
                "price_per_carat",
                "pricePerCarat",
                "PricePerCarat",
            ])?)?,
        })
    }

    fn matches(&self, specs: &DiamondSpecs) -> bool {
        self.color == specs.color
            && self.clarity == specs.clarity
            && carat_in_range(specs.carat, self.carat_min, self.carat_max)
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Freshness of one of a store's vendor lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPriceListStatus {
    pub list_type: ShapeType,
    pub fetched_at: Option<DateTime<Utc>>,
    pub is_stale: bool,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntryCount {
    pub shape_type: ShapeType,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvUploadSummary {
    pub shape_type: ShapeType,
    pub inserted: usize,
    pub skipped: usize,
}
