use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use wisebuy_market_data::VendorOAuthConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub metals_api_key: Option<String>,
    /// `None` disables the metals sync scheduler
    pub metals_sync_interval: Option<Duration>,
    pub vendor_client_id: Option<String>,
    pub vendor_client_secret: Option<String>,
    pub vendor_redirect_uri: Option<String>,
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("WB_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid WB_LISTEN_ADDR")?;
        let db_path = std::env::var("WB_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("WB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("WB_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let sync_secs: u64 = std::env::var("WB_METALS_SYNC_INTERVAL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .context("Invalid WB_METALS_SYNC_INTERVAL_SECS")?;
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            metals_api_key: optional_var("WB_METALS_API_KEY"),
            metals_sync_interval: (sync_secs > 0).then(|| Duration::from_secs(sync_secs)),
            vendor_client_id: optional_var("WB_VENDOR_CLIENT_ID"),
            vendor_client_secret: optional_var("WB_VENDOR_CLIENT_SECRET"),
            vendor_redirect_uri: optional_var("WB_VENDOR_REDIRECT_URI"),
        })
    }

    pub fn vendor_oauth(&self) -> VendorOAuthConfig {
        VendorOAuthConfig {
            client_id: self.vendor_client_id.clone(),
            client_secret: self.vendor_client_secret.clone(),
            redirect_uri: self.vendor_redirect_uri.clone(),
            ..Default::default()
        }
    }
}
