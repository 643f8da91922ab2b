use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::diamonds_csv::parse_price_csv;
use super::diamonds_model::{
    shape_code, CsvUploadSummary, DiamondPriceEntry, DiamondPriceResult, DiamondSpecs,
    PriceEntryCount, ShapeType, VendorPriceListStatus,
};
use super::diamonds_resolver::{DiamondPriceResolver, ResolutionContext};
use super::diamonds_traits::{
    DiamondPriceRepositoryTrait, DiamondServiceTrait, VendorPriceListRepositoryTrait,
};
use crate::errors::Result;
use crate::settings::SettingsServiceTrait;

pub struct DiamondService {
    price_repository: Arc<dyn DiamondPriceRepositoryTrait>,
    vendor_list_repository: Arc<dyn VendorPriceListRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
    resolver: DiamondPriceResolver,
}

impl DiamondService {
    pub fn new(
        price_repository: Arc<dyn DiamondPriceRepositoryTrait>,
        vendor_list_repository: Arc<dyn VendorPriceListRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self::with_resolver(
            price_repository,
            vendor_list_repository,
            settings_service,
            DiamondPriceResolver::new(),
        )
    }

    pub fn with_resolver(
        price_repository: Arc<dyn DiamondPriceRepositoryTrait>,
        vendor_list_repository: Arc<dyn VendorPriceListRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
        resolver: DiamondPriceResolver,
    ) -> Self {
        DiamondService {
            price_repository,
            vendor_list_repository,
            settings_service,
            resolver,
        }
    }
}

#[async_trait]
impl DiamondServiceTrait for DiamondService {
    fn resolve_price(&self, store_id: &str, specs: &DiamondSpecs) -> Result<DiamondPriceResult> {
        specs.validate()?;

        let shape_type = specs.shape_type();
        let dev_csv_enabled = self.settings_service.is_dev_diamond_pricing_enabled()?;
        let csv_entries = if dev_csv_enabled {
            self.price_repository
                .find_candidates(&shape_code(&specs.shape), &specs.color, &specs.clarity)?
        } else {
            Vec::new()
        };
        let vendor_list = self.vendor_list_repository.get(store_id, shape_type)?;

        let result = self.resolver.resolve(&ResolutionContext {
            specs,
            dev_csv_enabled,
            csv_entries: &csv_entries,
            vendor_list: vendor_list.as_ref(),
            now: Utc::now(),
        });
        debug!(
            "Diamond {} {} {} {}ct for store {} resolved via {}",
            specs.shape,
            specs.color,
            specs.clarity,
            specs.carat,
            store_id,
            result.source.as_str()
        );
        Ok(result)
    }

    async fn upload_price_csv(
        &self,
        shape_type: ShapeType,
        content: &[u8],
    ) -> Result<CsvUploadSummary> {
        let parsed = parse_price_csv(shape_type, content)?;
        let inserted = self
            .price_repository
            .replace_entries(shape_type, parsed.entries)
            .await?;
        info!(
            "Replaced {} price table: {} rows inserted, {} skipped",
            shape_type, inserted, parsed.skipped
        );

        Ok(CsvUploadSummary {
            shape_type,
            inserted,
            skipped: parsed.skipped,
        })
    }

    fn list_entries(&self, shape_type: ShapeType) -> Result<Vec<DiamondPriceEntry>> {
        self.price_repository.list_entries(shape_type)
    }

    fn entry_counts(&self) -> Result<Vec<PriceEntryCount>> {
        let counts = self.price_repository.count_by_shape_type()?;
        Ok(ShapeType::ALL
            .iter()
            .map(|shape_type| PriceEntryCount {
                shape_type: *shape_type,
                count: counts
                    .iter()
                    .find(|c| c.shape_type == *shape_type)
                    .map(|c| c.count)
                    .unwrap_or(0),
            })
            .collect())
    }

    fn vendor_price_list_status(&self, store_id: &str) -> Result<Vec<VendorPriceListStatus>> {
        let now = Utc::now();
        ShapeType::ALL
            .iter()
            .map(|list_type| {
                let list = self.vendor_list_repository.get(store_id, *list_type)?;
                Ok(VendorPriceListStatus {
                    list_type: *list_type,
                    fetched_at: list.as_ref().map(|l| l.fetched_at),
                    is_stale: list.as_ref().map_or(true, |l| l.is_stale(now)),
                    row_count: list.as_ref().map_or(0, |l| l.rows().len()),
                })
            })
            .collect()
    }
}
