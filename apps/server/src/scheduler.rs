//! Background scheduler for periodic metal price sync.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::main_lib::AppState;

/// Initial delay before first sync, so startup is not blocked on the provider
const INITIAL_DELAY_SECS: u64 = 30;

/// Starts the metals sync loop when an API key and an interval are configured.
pub fn start_metals_sync_scheduler(state: Arc<AppState>, config: &Config) {
    let Some(period) = config.metals_sync_interval else {
        debug!("Metals sync scheduler disabled");
        return;
    };
    if config.metals_api_key.is_none() {
        debug!("Metals sync scheduler not started: no API key configured");
        return;
    }

    tokio::spawn(async move {
        info!("Metals sync scheduler started ({}s interval)", period.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // first tick is immediate
        let mut sync_interval = interval(period);
        loop {
            sync_interval.tick().await;
            run_scheduled_sync(&state).await;
        }
    });
}

async fn run_scheduled_sync(state: &Arc<AppState>) {
    info!("Running scheduled metals sync...");
    match state.metal_service.sync_metal_prices().await {
        Ok(result) => info!(
            "Scheduled metals sync completed: {} prices stored",
            result.records.len()
        ),
        Err(e) => warn!("Scheduled metals sync failed: {}", e),
    }
}
