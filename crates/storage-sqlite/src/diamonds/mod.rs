//! SQLite storage implementation for diamond price tables and cached vendor lists.

mod model;
mod repository;

pub use model::{DiamondPriceEntryDB, VendorPriceListDB};
pub use repository::{DiamondPriceRepository, VendorPriceListRepository};

// Re-export traits from core for convenience
pub use wisebuy_core::diamonds::{DiamondPriceRepositoryTrait, VendorPriceListRepositoryTrait};
