//! WiseBuy Market Data Crate
//!
//! This crate talks to the remote price feeds the buy-quote engine depends on.
//! The domain layer treats every call here as an opaque remote procedure: it
//! passes parameters in and either gets data back or a [`MarketDataError`].
//!
//! # Overview
//!
//! - Precious metals: latest and historical per-troy-ounce prices for
//!   gold (XAU), silver (XAG), platinum (XPT) and palladium (XPD).
//! - Diamond vendor: OAuth authorization-code exchange, token refresh and
//!   bulk price-list download for the round and fancy lists.
//!
//! # Architecture
//!
//! ```text
//! +------------------+        +----------------------+
//! |   Domain Layer   | -----> |  MetalsPriceProvider |  (MetalPriceApiProvider)
//! | (wisebuy-core)   |        +----------------------+
//! |                  |        +----------------------+
//! |                  | -----> | DiamondVendorProvider|  (RapaportProvider)
//! +------------------+        +----------------------+
//! ```
//!
//! No retry or circuit breaking happens here. A failed call is reported to the
//! caller, which decides what to surface.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{MetalSpotPrice, PriceListKind, VendorTokenGrant, SUPPORTED_METALS};
pub use provider::metal_price_api::MetalPriceApiProvider;
pub use provider::vendor::{RapaportProvider, VendorOAuthConfig};
pub use provider::{DiamondVendorProvider, MetalsPriceProvider};
