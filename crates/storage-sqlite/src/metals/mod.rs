//! SQLite storage implementation for metal price history.

mod model;
mod repository;

pub use model::PriceHistoryDB;
pub use repository::MetalPriceRepository;

// Re-export trait from core for convenience
pub use wisebuy_core::metals::MetalPriceRepositoryTrait;
