use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SETTING_USE_DEV_DIAMOND_PRICING: &str = "use_dev_diamond_pricing";
pub const SETTING_LAST_METALS_SYNC_AT: &str = "last_metals_sync_at";
pub const SETTING_LAST_METALS_SYNC_STATUS: &str = "last_metals_sync_status";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Price diamonds from the uploaded CSV tables instead of vendor lists
    pub use_dev_diamond_pricing: bool,
    pub last_metals_sync_at: Option<DateTime<Utc>>,
    pub last_metals_sync_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub use_dev_diamond_pricing: Option<bool>,
}
