//! Database model for metal price history.

use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::{format_date, format_decimal, format_timestamp, parse_date, parse_decimal};
use wisebuy_core::metals::{MetalPriceRecord, MetalType};

/// One row of `price_history`: a metal's price on a given day.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::price_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceHistoryDB {
    pub id: String,
    pub metal_type: String,
    pub price_date: String,
    pub price_per_ounce: String,
    pub price_per_dwt: String,
    pub created_at: String,
}

impl PriceHistoryDB {
    /// Converts a row to a domain record, skipping rows with an unknown metal.
    pub fn into_record(self) -> Option<MetalPriceRecord> {
        let metal = match MetalType::from_str(&self.metal_type) {
            Ok(metal) => metal,
            Err(e) => {
                error!("Skipping price_history row {}: {}", self.id, e);
                return None;
            }
        };
        Some(MetalPriceRecord {
            metal_type: metal,
            date: parse_date(&self.price_date, "price_date"),
            price_per_ounce: parse_decimal(&self.price_per_ounce, "price_per_ounce"),
            price_per_dwt: parse_decimal(&self.price_per_dwt, "price_per_dwt"),
        })
    }
}

impl From<&MetalPriceRecord> for PriceHistoryDB {
    fn from(record: &MetalPriceRecord) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            metal_type: record.metal_type.code().to_string(),
            price_date: format_date(record.date),
            price_per_ounce: format_decimal(record.price_per_ounce),
            price_per_dwt: format_decimal(record.price_per_dwt),
            created_at: format_timestamp(chrono::Utc::now()),
        }
    }
}
