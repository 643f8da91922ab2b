use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::PriceHistoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::price_history;
use crate::utils::format_date;
use wisebuy_core::errors::Result;
use wisebuy_core::metals::{MetalPriceRecord, MetalPriceRepositoryTrait, MetalType};

/// Repository for the daily metal price history
pub struct MetalPriceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MetalPriceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl MetalPriceRepositoryTrait for MetalPriceRepository {
    async fn upsert_prices(&self, records: Vec<MetalPriceRecord>) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        self.writer
            .exec(move |conn| {
                let mut written = 0;
                for record in &records {
                    let row = PriceHistoryDB::from(record);
                    written += diesel::insert_into(price_history::table)
                        .values(&row)
                        .on_conflict((price_history::metal_type, price_history::price_date))
                        .do_update()
                        .set((
                            price_history::price_per_ounce.eq(&row.price_per_ounce),
                            price_history::price_per_dwt.eq(&row.price_per_dwt),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }

    fn get_latest(&self, metal: MetalType, as_of: NaiveDate) -> Result<Option<MetalPriceRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let row = price_history::table
            .select(PriceHistoryDB::as_select())
            .filter(price_history::metal_type.eq(metal.code()))
            .filter(price_history::price_date.le(format_date(as_of)))
            .order(price_history::price_date.desc())
            .first::<PriceHistoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.and_then(PriceHistoryDB::into_record))
    }

    fn get_since(&self, metal: MetalType, since: NaiveDate) -> Result<Vec<MetalPriceRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = price_history::table
            .select(PriceHistoryDB::as_select())
            .filter(price_history::metal_type.eq(metal.code()))
            .filter(price_history::price_date.ge(format_date(since)))
            .order(price_history::price_date.asc())
            .load::<PriceHistoryDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(PriceHistoryDB::into_record)
            .collect())
    }
}
