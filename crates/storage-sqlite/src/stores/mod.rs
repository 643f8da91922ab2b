//! SQLite storage implementation for stores.

mod model;
mod repository;

pub use model::StoreDB;
pub use repository::StoreRepository;

// Re-export trait from core for convenience
pub use wisebuy_core::stores::StoreRepositoryTrait;
