use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use std::str::FromStr;
use std::sync::Arc;

use super::model::{DiamondPriceEntryDB, VendorPriceListDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{diamond_price_entries, store_diamond_pricelists};
use wisebuy_core::diamonds::{
    DiamondPriceEntry, DiamondPriceRepositoryTrait, NewDiamondPriceEntry, PriceEntryCount,
    ShapeType, VendorPriceList, VendorPriceListRepositoryTrait,
};
use wisebuy_core::errors::Result;

/// Repository for the uploaded diamond price tables
pub struct DiamondPriceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DiamondPriceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DiamondPriceRepositoryTrait for DiamondPriceRepository {
    async fn replace_entries(
        &self,
        shape_type: ShapeType,
        entries: Vec<NewDiamondPriceEntry>,
    ) -> Result<usize> {
        let rows: Vec<DiamondPriceEntryDB> = entries.into_iter().map(Into::into).collect();

        self.writer
            .exec(move |conn| {
                diesel::delete(
                    diamond_price_entries::table
                        .filter(diamond_price_entries::shape_type.eq(shape_type.as_str())),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                let mut inserted = 0;
                for chunk in rows.chunks(500) {
                    inserted += diesel::insert_into(diamond_price_entries::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    fn list_entries(&self, shape_type: ShapeType) -> Result<Vec<DiamondPriceEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = diamond_price_entries::table
            .select(DiamondPriceEntryDB::as_select())
            .filter(diamond_price_entries::shape_type.eq(shape_type.as_str()))
            .order((
                diamond_price_entries::color.asc(),
                diamond_price_entries::clarity.asc(),
            ))
            .load::<DiamondPriceEntryDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut entries: Vec<DiamondPriceEntry> = rows.into_iter().map(Into::into).collect();
        // carat bounds are text columns; order them numerically here
        entries.sort_by(|a, b| {
            (&a.color, &a.clarity, a.carat_min).cmp(&(&b.color, &b.clarity, b.carat_min))
        });
        Ok(entries)
    }

    fn find_candidates(
        &self,
        shape_code: &str,
        color: &str,
        clarity: &str,
    ) -> Result<Vec<DiamondPriceEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = diamond_price_entries::table
            .select(DiamondPriceEntryDB::as_select())
            .filter(diamond_price_entries::shape_code.eq(shape_code))
            .filter(diamond_price_entries::color.eq(color))
            .filter(diamond_price_entries::clarity.eq(clarity))
            .load::<DiamondPriceEntryDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut entries: Vec<DiamondPriceEntry> = rows.into_iter().map(Into::into).collect();
        entries.sort_by(|a, b| a.carat_min.cmp(&b.carat_min));
        Ok(entries)
    }

    fn count_by_shape_type(&self) -> Result<Vec<PriceEntryCount>> {
        let mut conn = get_connection(&self.pool)?;

        let counts = diamond_price_entries::table
            .group_by(diamond_price_entries::shape_type)
            .select((diamond_price_entries::shape_type, count_star()))
            .load::<(String, i64)>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(counts
            .into_iter()
            .filter_map(|(shape, count)| {
                ShapeType::from_str(&shape)
                    .ok()
                    .map(|shape_type| PriceEntryCount { shape_type, count })
            })
            .collect())
    }
}

/// Repository for vendor price lists cached per store
pub struct VendorPriceListRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VendorPriceListRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl VendorPriceListRepositoryTrait for VendorPriceListRepository {
    fn get(&self, store_id: &str, list_type: ShapeType) -> Result<Option<VendorPriceList>> {
        let mut conn = get_connection(&self.pool)?;

        let row = store_diamond_pricelists::table
            .select(VendorPriceListDB::as_select())
            .find((store_id, list_type.as_str()))
            .first::<VendorPriceListDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(VendorPriceList::from))
    }

    async fn upsert(&self, list: VendorPriceList) -> Result<VendorPriceList> {
        let row = VendorPriceListDB::from(&list);

        self.writer
            .exec(move |conn| {
                diesel::insert_into(store_diamond_pricelists::table)
                    .values(&row)
                    .on_conflict((
                        store_diamond_pricelists::store_id,
                        store_diamond_pricelists::list_type,
                    ))
                    .do_update()
                    .set((
                        store_diamond_pricelists::content.eq(&row.content),
                        store_diamond_pricelists::fetched_at.eq(&row.fetched_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(list)
            })
            .await
    }
}
