use super::settings_model::{
    SETTING_LAST_METALS_SYNC_AT, SETTING_LAST_METALS_SYNC_STATUS,
    SETTING_USE_DEV_DIAMOND_PRICING,
};
use super::SettingsRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::{Settings, SettingsUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<Settings>;

    /// Whether diamond pricing reads the uploaded CSV tables.
    fn is_dev_diamond_pricing_enabled(&self) -> Result<bool>;

    /// Stores when the last metals sync ran and how it ended.
    async fn record_metals_sync(&self, at: DateTime<Utc>, status: &str) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.settings_repository.get_settings()
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<Settings> {
        self.settings_repository
            .update_settings(new_settings)
            .await?;
        self.settings_repository.get_settings()
    }

    fn is_dev_diamond_pricing_enabled(&self) -> Result<bool> {
        match self
            .settings_repository
            .get_setting(SETTING_USE_DEV_DIAMOND_PRICING)
        {
            Ok(value) => Ok(value.parse().unwrap_or(false)),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn record_metals_sync(&self, at: DateTime<Utc>, status: &str) -> Result<()> {
        debug!("Recording metals sync at {}: {}", at, status);
        self.settings_repository
            .update_setting(SETTING_LAST_METALS_SYNC_AT, &at.to_rfc3339())
            .await?;
        self.settings_repository
            .update_setting(SETTING_LAST_METALS_SYNC_STATUS, status)
            .await
    }
}
