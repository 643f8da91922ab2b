//! Database model for saved quotes.

use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};
use wisebuy_core::quotes::{CustomerInfo, Quote, QuoteItem, QuoteStatus};

/// Database model for quotes. Line items are kept as a JSON array.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub id: String,
    pub store_id: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub items: String,
    pub total_value: String,
    pub status: String,
    pub created_at: String,
}

impl TryFrom<&Quote> for QuoteDB {
    type Error = StorageError;

    fn try_from(quote: &Quote) -> Result<Self, Self::Error> {
        Ok(Self {
            id: quote.id.clone(),
            store_id: quote.store_id.clone(),
            customer_name: quote.customer.name.clone(),
            customer_phone: quote.customer.phone.clone(),
            customer_email: quote.customer.email.clone(),
            customer_address: quote.customer.address.clone(),
            items: serde_json::to_string(&quote.items)?,
            total_value: format_decimal(quote.total_value),
            status: quote.status.as_str().to_string(),
            created_at: format_timestamp(quote.created_at),
        })
    }
}

impl From<QuoteDB> for Quote {
    fn from(db: QuoteDB) -> Self {
        let items: Vec<QuoteItem> = serde_json::from_str(&db.items).unwrap_or_else(|e| {
            error!("Quote {} has unreadable items: {}", db.id, e);
            Vec::new()
        });
        Self {
            customer: CustomerInfo {
                name: db.customer_name,
                phone: db.customer_phone,
                email: db.customer_email,
                address: db.customer_address,
            },
            items,
            total_value: parse_decimal(&db.total_value, "total_value"),
            status: QuoteStatus::Completed,
            created_at: parse_timestamp(&db.created_at, "created_at"),
            id: db.id,
            store_id: db.store_id,
        }
    }
}
