//! Diamonds module - CSV price tables, vendor price lists, and price resolution.

mod diamonds_csv;
mod diamonds_model;
mod diamonds_resolver;
mod diamonds_service;
mod diamonds_traits;


pub use diamonds_csv::{parse_price_csv, ParsedPriceCsv};
pub use diamonds_model::{
    carat_in_range, shape_code, CsvUploadSummary, DiamondPriceEntry, DiamondPriceResult,
    DiamondSpecs, NewDiamondPriceEntry, PriceEntryCount, PricingSource, ShapeType,
    VendorPriceList, VendorPriceListStatus, ROUND_SHAPE_CODE,
};
pub use diamonds_resolver::{
    DevCsvStrategy, DiamondPriceResolver, DiamondPriceStrategy, ManualEntryStrategy,
    ResolutionContext, VendorListStrategy, MANUAL_ENTRY_MESSAGE, STALE_VENDOR_LIST_MESSAGE,
};
pub use diamonds_service::DiamondService;
pub use diamonds_traits::{
    DiamondPriceRepositoryTrait, DiamondServiceTrait, VendorPriceListRepositoryTrait,
};
