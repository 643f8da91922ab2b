//! Stores module - onboarding and per-store pricing configuration.

mod stores_model;
mod stores_service;
mod stores_traits;


pub use stores_model::{
    validate_discount, MetalMarkup, NewStore, PricingSettingsUpdate, Store, StoreStatus,
};
pub use stores_service::StoreService;
pub use stores_traits::{StoreRepositoryTrait, StoreServiceTrait};
