use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::stores_model::{NewStore, PricingSettingsUpdate, Store, StoreStatus};
use super::stores_traits::{StoreRepositoryTrait, StoreServiceTrait};
use crate::errors::{Error, Result};
use crate::metals::StorePricingConfig;
use crate::pricing_cache::PricingCacheServiceTrait;

pub struct StoreService {
    repository: Arc<dyn StoreRepositoryTrait>,
    pricing_cache_service: Arc<dyn PricingCacheServiceTrait>,
}

impl StoreService {
    pub fn new(
        repository: Arc<dyn StoreRepositoryTrait>,
        pricing_cache_service: Arc<dyn PricingCacheServiceTrait>,
    ) -> Self {
        StoreService {
            repository,
            pricing_cache_service,
        }
    }
}

#[async_trait]
impl StoreServiceTrait for StoreService {
    async fn register_store(&self, mut new_store: NewStore) -> Result<Store> {
        new_store.validate()?;
        new_store.admin_email = new_store.admin_email.trim().to_lowercase();

        if self
            .repository
            .find_by_admin_email(&new_store.admin_email)?
            .is_some()
        {
            return Err(Error::ConstraintViolation(format!(
                "A store is already registered for {}",
                new_store.admin_email
            )));
        }

        let store = self.repository.create(new_store).await?;
        info!("Registered store {} ({})", store.name, store.id);
        Ok(store)
    }

    async fn approve_store(&self, store_id: &str) -> Result<Store> {
        let store = self.repository.get_by_id(store_id)?;
        match store.status {
            StoreStatus::Active => Ok(store),
            StoreStatus::Rejected => Err(Error::ConstraintViolation(format!(
                "Store {} was rejected and cannot be approved",
                store_id
            ))),
            StoreStatus::Pending => {
                info!("Approving store {}", store_id);
                self.repository
                    .update_status(store_id, StoreStatus::Active)
                    .await
            }
        }
    }

    async fn reject_store(&self, store_id: &str) -> Result<Store> {
        let store = self.repository.get_by_id(store_id)?;
        match store.status {
            StoreStatus::Rejected => Ok(store),
            StoreStatus::Active => Err(Error::ConstraintViolation(format!(
                "Store {} is already active",
                store_id
            ))),
            StoreStatus::Pending => {
                info!("Rejecting store {}", store_id);
                self.repository
                    .update_status(store_id, StoreStatus::Rejected)
                    .await
            }
        }
    }

    fn list_stores(&self) -> Result<Vec<Store>> {
        self.repository.list()
    }

    fn get_store(&self, store_id: &str) -> Result<Store> {
        self.repository.get_by_id(store_id)
    }

    fn find_by_admin_email(&self, email: &str) -> Result<Option<Store>> {
        self.repository
            .find_by_admin_email(&email.trim().to_lowercase())
    }

    fn pricing_config(&self, store_id: &str) -> Result<StorePricingConfig> {
        Ok(self.repository.get_by_id(store_id)?.pricing_config())
    }

    async fn update_pricing_settings(
        &self,
        store_id: &str,
        update: PricingSettingsUpdate,
    ) -> Result<Store> {
        update.validate()?;

        let store = self
            .repository
            .update_pricing_settings(store_id, &update)
            .await?;
        debug!(
            "Store {} pricing set to {} with {}% discount",
            store_id, store.pricing_basis, store.discount_percent
        );

        self.pricing_cache_service
            .update_cache(&store.pricing_config())?;
        Ok(store)
    }
}
