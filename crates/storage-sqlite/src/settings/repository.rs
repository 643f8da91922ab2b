use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use log::warn;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use wisebuy_core::errors::Result;
use wisebuy_core::settings::{
    Settings, SettingsRepositoryTrait, SettingsUpdate, SETTING_LAST_METALS_SYNC_AT,
    SETTING_LAST_METALS_SYNC_STATUS, SETTING_USE_DEV_DIAMOND_PRICING,
};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let mut conn = get_connection(&self.pool)?;
        let all_settings: Vec<(String, String)> = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut settings = Settings::default();

        for (key, value) in all_settings {
            match key.as_str() {
                SETTING_USE_DEV_DIAMOND_PRICING => {
                    settings.use_dev_diamond_pricing = value.parse().unwrap_or(false);
                }
                SETTING_LAST_METALS_SYNC_AT => {
                    settings.last_metals_sync_at = DateTime::parse_from_rfc3339(&value)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| warn!("Ignoring unreadable {}: {}", key, e))
                        .ok();
                }
                SETTING_LAST_METALS_SYNC_STATUS => {
                    settings.last_metals_sync_status = Some(value);
                }
                _ => {} // Ignore unknown settings
            }
        }

        Ok(settings)
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let settings = new_settings.clone();
        self.writer
            .exec(move |conn| {
                if let Some(enabled) = settings.use_dev_diamond_pricing {
                    diesel::replace_into(app_settings)
                        .values(&AppSettingDB::new(
                            SETTING_USE_DEV_DIAMOND_PRICING,
                            enabled.to_string(),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }

    fn get_setting(&self, setting_key_param: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        app_settings
            .filter(setting_key.eq(setting_key_param))
            .select(setting_value)
            .first::<String>(&mut conn)
            .map_err(|e| StorageError::from(e).into())
    }

    async fn update_setting(
        &self,
        setting_key_param: &str,
        setting_value_param: &str,
    ) -> Result<()> {
        let record = AppSettingDB::new(setting_key_param, setting_value_param);

        self.writer
            .exec(move |conn| {
                diesel::replace_into(app_settings)
                    .values(&record)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
