//! Database models for diamond pricing.

use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};
use wisebuy_core::diamonds::{DiamondPriceEntry, NewDiamondPriceEntry, ShapeType, VendorPriceList};

/// Database model for an uploaded price table row
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::diamond_price_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DiamondPriceEntryDB {
    pub id: String,
    pub shape_code: String,
    pub shape_type: String,
    pub color: String,
    pub clarity: String,
    pub carat_min: String,
    pub carat_max: String,
    pub price_per_carat: String,
    pub created_at: String,
}

fn parse_shape_type(value: &str, owner: &str) -> ShapeType {
    ShapeType::from_str(value).unwrap_or_else(|e| {
        error!("{} has invalid shape type: {}", owner, e);
        ShapeType::Fancy
    })
}

impl From<DiamondPriceEntryDB> for DiamondPriceEntry {
    fn from(db: DiamondPriceEntryDB) -> Self {
        Self {
            shape_type: parse_shape_type(&db.shape_type, &db.id),
            carat_min: parse_decimal(&db.carat_min, "carat_min"),
            carat_max: parse_decimal(&db.carat_max, "carat_max"),
            price_per_carat: parse_decimal(&db.price_per_carat, "price_per_carat"),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            id: db.id,
            shape_code: db.shape_code,
            color: db.color,
            clarity: db.clarity,
        }
    }
}

impl From<NewDiamondPriceEntry> for DiamondPriceEntryDB {
    fn from(domain: NewDiamondPriceEntry) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            shape_code: domain.shape_code,
            shape_type: domain.shape_type.as_str().to_string(),
            color: domain.color,
            clarity: domain.clarity,
            carat_min: format_decimal(domain.carat_min),
            carat_max: format_decimal(domain.carat_max),
            price_per_carat: format_decimal(domain.price_per_carat),
            created_at: format_timestamp(chrono::Utc::now()),
        }
    }
}

/// Database model for a vendor price list cached for a store
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::store_diamond_pricelists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VendorPriceListDB {
    pub store_id: String,
    pub list_type: String,
    pub content: String,
    pub fetched_at: String,
}

impl From<VendorPriceListDB> for VendorPriceList {
    fn from(db: VendorPriceListDB) -> Self {
        let content = serde_json::from_str(&db.content).unwrap_or_else(|e| {
            error!(
                "Vendor {} list for store {} is not valid JSON: {}",
                db.list_type, db.store_id, e
            );
            Value::Array(vec![])
        });
        Self {
            list_type: parse_shape_type(&db.list_type, &db.store_id),
            fetched_at: parse_timestamp(&db.fetched_at, "fetched_at"),
            store_id: db.store_id,
            content,
        }
    }
}

impl From<&VendorPriceList> for VendorPriceListDB {
    fn from(domain: &VendorPriceList) -> Self {
        Self {
            store_id: domain.store_id.clone(),
            list_type: domain.list_type.as_str().to_string(),
            content: domain.content.to_string(),
            fetched_at: format_timestamp(domain.fetched_at),
        }
    }
}
