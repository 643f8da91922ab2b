//! Market data models
//!
//! - `metal` - Spot prices for precious metals
//! - `vendor` - Diamond vendor OAuth grants and price-list kinds

mod metal;
mod vendor;

pub use metal::{MetalSpotPrice, SUPPORTED_METALS};
pub use vendor::{PriceListKind, VendorTokenGrant};
