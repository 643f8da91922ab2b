//! Database model for stores.

use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};
use wisebuy_core::constants::DEFAULT_DISCOUNT_PERCENT;
use wisebuy_core::metals::PricingBasis;
use wisebuy_core::stores::{MetalMarkup, NewStore, Store, StoreStatus};

/// Database model for stores
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::stores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StoreDB {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: Option<String>,
    pub status: String,
    pub admin_email: String,
    pub admin_name: String,
    pub admin_password_hash: String,
    pub gold_markup: String,
    pub silver_markup: String,
    pub platinum_markup: String,
    pub pricing_basis: String,
    pub discount_percent: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StoreDB> for Store {
    fn from(db: StoreDB) -> Self {
        let status = StoreStatus::from_str(&db.status).unwrap_or_else(|e| {
            error!("Store {} has invalid status: {}", db.id, e);
            StoreStatus::Pending
        });
        let pricing_basis = PricingBasis::from_str(&db.pricing_basis).unwrap_or_else(|e| {
            error!("Store {} has invalid pricing basis: {}", db.id, e);
            PricingBasis::default()
        });

        Self {
            metal_markup: MetalMarkup {
                gold: parse_decimal(&db.gold_markup, "gold_markup"),
                silver: parse_decimal(&db.silver_markup, "silver_markup"),
                platinum: parse_decimal(&db.platinum_markup, "platinum_markup"),
            },
            discount_percent: parse_decimal(&db.discount_percent, "discount_percent"),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
            id: db.id,
            name: db.name,
            address: db.address,
            phone: db.phone,
            website: db.website,
            status,
            admin_email: db.admin_email,
            admin_name: db.admin_name,
            admin_password_hash: db.admin_password_hash,
            pricing_basis,
        }
    }
}

impl From<NewStore> for StoreDB {
    fn from(domain: NewStore) -> Self {
        let now = format_timestamp(chrono::Utc::now());
        let markup = domain.metal_markup.unwrap_or_default();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: domain.name,
            address: domain.address,
            phone: domain.phone,
            website: domain.website,
            status: StoreStatus::Pending.as_str().to_string(),
            admin_email: domain.admin_email,
            admin_name: domain.admin_name,
            admin_password_hash: domain.admin_password_hash,
            gold_markup: format_decimal(markup.gold),
            silver_markup: format_decimal(markup.silver),
            platinum_markup: format_decimal(markup.platinum),
            pricing_basis: domain.pricing_basis.unwrap_or_default().as_str().to_string(),
            discount_percent: format_decimal(
                domain.discount_percent.unwrap_or(DEFAULT_DISCOUNT_PERCENT),
            ),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
