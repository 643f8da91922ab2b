//! Store domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_DISCOUNT_PERCENT;
use crate::errors::{Error, Result, ValidationError};
use crate::metals::{PricingBasis, StorePricingConfig};

/// Onboarding state of a store. Only active stores may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    #[default]
    Pending,
    Active,
    Rejected,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Pending => "pending",
            StoreStatus::Active => "active",
            StoreStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(StoreStatus::Pending),
            "active" => Ok(StoreStatus::Active),
            "rejected" => Ok(StoreStatus::Rejected),
            _ => Err(Error::invalid_input(format!("Unknown store status '{}'", s))),
        }
    }
}

/// Per-metal markup percentages a store applies when reselling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalMarkup {
    pub gold: Decimal,
    pub silver: Decimal,
    pub platinum: Decimal,
}

impl Default for MetalMarkup {
    fn default() -> Self {
        MetalMarkup {
            gold: dec!(20),
            silver: dec!(15),
            platinum: dec!(25),
        }
    }
}

/// Domain model representing a jewelry store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: Option<String>,
    pub status: StoreStatus,
    pub admin_email: String,
    pub admin_name: String,
    /// argon2 PHC string; never sent to clients
    #[serde(skip_serializing, default)]
    pub admin_password_hash: String,
    pub metal_markup: MetalMarkup,
    pub pricing_basis: PricingBasis,
    pub discount_percent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn pricing_config(&self) -> StorePricingConfig {
        StorePricingConfig {
            store_id: self.id.clone(),
            pricing_basis: self.pricing_basis,
            discount_percent: self.discount_percent,
        }
    }
}

/// Input model for registering a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStore {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: Option<String>,
    pub admin_email: String,
    pub admin_name: String,
    #[serde(skip_serializing, default)]
    pub admin_password_hash: String,
    pub metal_markup: Option<MetalMarkup>,
    pub pricing_basis: Option<PricingBasis>,
    pub discount_percent: Option<Decimal>,
}

impl NewStore {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.admin_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "adminName".to_string(),
            )));
        }
        let email = self.admin_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::invalid_input("Admin email is not a valid address"));
        }
        if self.admin_password_hash.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "adminPassword".to_string(),
            )));
        }
        if let Some(markup) = &self.metal_markup {
            if [markup.gold, markup.silver, markup.platinum]
                .iter()
                .any(|m| m.is_sign_negative())
            {
                return Err(Error::invalid_input("Metal markups cannot be negative"));
            }
        }
        validate_discount(self.discount_percent.unwrap_or(DEFAULT_DISCOUNT_PERCENT))
    }
}

/// The explicit settings-update operation for a store's pricing inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettingsUpdate {
    pub pricing_basis: PricingBasis,
    pub discount_percent: Decimal,
}

impl PricingSettingsUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_discount(self.discount_percent)
    }
}

/// Discounts are percentages in `[0, 100]`.
pub fn validate_discount(discount_percent: Decimal) -> Result<()> {
    if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
        return Err(Error::invalid_input(format!(
            "Discount must be between 0 and 100, got {}",
            discount_percent
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_store() -> NewStore {
        NewStore {
            name: "Main Street Jewelers".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            website: None,
            admin_email: "owner@mainstreet.example".to_string(),
            admin_name: "Pat Owner".to_string(),
            admin_password_hash: "$argon2id$v=19$stub".to_string(),
            metal_markup: None,
            pricing_basis: None,
            discount_percent: None,
        }
    }

    #[test]
    fn test_new_store_validation() {
        assert!(new_store().validate().is_ok());

        let mut blank_name = new_store();
        blank_name.name = "  ".to_string();
        assert!(blank_name.validate().is_err());

        let mut bad_email = new_store();
        bad_email.admin_email = "owner".to_string();
        assert!(bad_email.validate().is_err());

        let mut bad_discount = new_store();
        bad_discount.discount_percent = Some(dec!(100.5));
        assert!(bad_discount.validate().is_err());
    }

    #[test]
    fn test_discount_bounds_are_inclusive() {
        assert!(validate_discount(dec!(0)).is_ok());
        assert!(validate_discount(dec!(100)).is_ok());
        assert!(validate_discount(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let now = Utc::now();
        let store = Store {
            id: "s1".to_string(),
            name: "Shop".to_string(),
            address: String::new(),
            phone: String::new(),
            website: None,
            status: StoreStatus::Active,
            admin_email: "a@b.c".to_string(),
            admin_name: "A".to_string(),
            admin_password_hash: "secret-hash".to_string(),
            metal_markup: MetalMarkup::default(),
            pricing_basis: PricingBasis::Yeob,
            discount_percent: dec!(10),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&store).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"status\":\"active\""));
    }
}
