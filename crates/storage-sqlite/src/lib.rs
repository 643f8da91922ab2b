//! SQLite storage implementation for WiseBuy.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `wisebuy-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! All writes go through a single writer actor ([`WriteHandle`]); reads use
//! pooled connections directly.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod diamonds;
pub mod metals;
pub mod quotes;
pub mod settings;
pub mod stores;
pub mod vendor;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use diamonds::{DiamondPriceRepository, VendorPriceListRepository};
pub use metals::MetalPriceRepository;
pub use quotes::QuoteRepository;
pub use settings::SettingsRepository;
pub use stores::StoreRepository;
pub use vendor::{VendorAuthLogRepository, VendorTokenRepository};

// Re-export from wisebuy-core for convenience
pub use wisebuy_core::errors::{DatabaseError, Error, Result};
