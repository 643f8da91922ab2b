//! Diamond price repository and service traits.

use async_trait::async_trait;

use super::diamonds_model::{
    CsvUploadSummary, DiamondPriceEntry, DiamondPriceResult, DiamondSpecs,
    NewDiamondPriceEntry, PriceEntryCount, ShapeType, VendorPriceList, VendorPriceListStatus,
};
use crate::errors::Result;

/// Uploaded CSV price tables.
#[async_trait]
pub trait DiamondPriceRepositoryTrait: Send + Sync {
    /// Deletes every entry of `shape_type` and inserts `entries`, atomically.
    ///
    /// Returns the number of entries inserted.
    async fn replace_entries(
        &self,
        shape_type: ShapeType,
        entries: Vec<NewDiamondPriceEntry>,
    ) -> Result<usize>;

    fn list_entries(&self, shape_type: ShapeType) -> Result<Vec<DiamondPriceEntry>>;

    /// Entries of a shape code with the given color and clarity, ordered by
    /// `carat_min`. Carat matching is left to the caller.
    fn find_candidates(
        &self,
        shape_code: &str,
        color: &str,
        clarity: &str,
    ) -> Result<Vec<DiamondPriceEntry>>;

    fn count_by_shape_type(&self) -> Result<Vec<PriceEntryCount>>;
}

/// Vendor price lists cached per store.
#[async_trait]
pub trait VendorPriceListRepositoryTrait: Send + Sync {
    fn get(&self, store_id: &str, list_type: ShapeType) -> Result<Option<VendorPriceList>>;

    /// Replaces the store's list of the same type.
    async fn upsert(&self, list: VendorPriceList) -> Result<VendorPriceList>;
}

#[async_trait]
pub trait DiamondServiceTrait: Send + Sync {
    /// Resolves a price per carat for a stone on behalf of a store.
    fn resolve_price(&self, store_id: &str, specs: &DiamondSpecs) -> Result<DiamondPriceResult>;

    /// Replaces the price table of a shape type with the rows of a CSV file.
    async fn upload_price_csv(
        &self,
        shape_type: ShapeType,
        content: &[u8],
    ) -> Result<CsvUploadSummary>;

    fn list_entries(&self, shape_type: ShapeType) -> Result<Vec<DiamondPriceEntry>>;

    fn entry_counts(&self) -> Result<Vec<PriceEntryCount>>;

    fn vendor_price_list_status(&self, store_id: &str) -> Result<Vec<VendorPriceListStatus>>;
}
