//! Metals module - price history, purity grades, and metal price resolution.

mod metals_model;
mod metals_resolver;
mod metals_service;
mod metals_traits;
mod purity;


pub use metals_model::{
    BackfillResult, BackfillStatus, MetalPriceRecord, MetalPriceSource, MetalSyncResult,
    MetalType, PricingBasis, PurityPrice, ResolvedMetalPrice, StorePricingConfig,
};
pub use metals_resolver::{aggregate_history, discounted_price, MetalPriceResolver};
pub use metals_service::MetalService;
pub use metals_traits::{MetalPriceRepositoryTrait, MetalServiceTrait};
pub use purity::{find_purity, purity_table, Purity};
