//! SQLite storage implementation for saved quotes.

mod model;
mod repository;

pub use model::QuoteDB;
pub use repository::QuoteRepository;

// Re-export trait from core for convenience
pub use wisebuy_core::quotes::QuoteRepositoryTrait;
