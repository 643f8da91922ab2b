//! Store repository and service traits.

use async_trait::async_trait;

use super::stores_model::{NewStore, PricingSettingsUpdate, Store, StoreStatus};
use crate::errors::Result;
use crate::metals::StorePricingConfig;

/// Trait defining the contract for Store repository operations.
#[async_trait]
pub trait StoreRepositoryTrait: Send + Sync {
    /// Persists a new pending store, filling unset pricing fields with defaults.
    async fn create(&self, new_store: NewStore) -> Result<Store>;

    /// Retrieves a store by its ID. Fails with a not-found error when absent.
    fn get_by_id(&self, store_id: &str) -> Result<Store>;

    fn find_by_admin_email(&self, email: &str) -> Result<Option<Store>>;

    /// All stores, newest first.
    fn list(&self) -> Result<Vec<Store>>;

    async fn update_status(&self, store_id: &str, status: StoreStatus) -> Result<Store>;

    async fn update_pricing_settings(
        &self,
        store_id: &str,
        update: &PricingSettingsUpdate,
    ) -> Result<Store>;
}

#[async_trait]
pub trait StoreServiceTrait: Send + Sync {
    async fn register_store(&self, new_store: NewStore) -> Result<Store>;

    async fn approve_store(&self, store_id: &str) -> Result<Store>;

    async fn reject_store(&self, store_id: &str) -> Result<Store>;

    fn list_stores(&self) -> Result<Vec<Store>>;

    fn get_store(&self, store_id: &str) -> Result<Store>;

    fn find_by_admin_email(&self, email: &str) -> Result<Option<Store>>;

    fn pricing_config(&self, store_id: &str) -> Result<StorePricingConfig>;

    /// Persists new pricing settings and refreshes the store's pricing cache.
    async fn update_pricing_settings(
        &self,
        store_id: &str,
        update: PricingSettingsUpdate,
    ) -> Result<Store>;
}
