//! Remote price feed abstractions and implementations.
//!
//! This module contains:
//! - The `MetalsPriceProvider` trait for precious metals prices
//! - The `DiamondVendorProvider` trait for the diamond vendor's OAuth and price lists
//! - Concrete implementations (Metal Price API, Rapaport)

mod traits;

pub mod metal_price_api;
pub mod vendor;

// Re-exports
pub use traits::{DiamondVendorProvider, MetalsPriceProvider};
