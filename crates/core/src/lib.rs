//! WiseBuy Core - Domain entities, services, and traits.
//!
//! This crate contains the buy-quote pricing logic: metal price history and
//! purity pricing, diamond price resolution, store onboarding, the vendor
//! OAuth connection, and quote capture. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod diamonds;
pub mod errors;
pub mod metals;
pub mod pricing_cache;
pub mod quotes;
pub mod settings;
pub mod stores;
pub mod vendor;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
