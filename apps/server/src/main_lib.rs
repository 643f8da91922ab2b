use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wisebuy_core::{
    diamonds::{DiamondService, DiamondServiceTrait},
    metals::{MetalService, MetalServiceTrait},
    pricing_cache::{InMemoryPricingCache, PricingCacheService, PricingCacheServiceTrait},
    quotes::{QuoteService, QuoteServiceTrait},
    settings::{SettingsService, SettingsServiceTrait},
    stores::{StoreService, StoreServiceTrait},
    vendor::{VendorService, VendorServiceTrait},
};
use wisebuy_market_data::{MetalPriceApiProvider, RapaportProvider};
use wisebuy_storage_sqlite::{
    db::{self, write_actor},
    DiamondPriceRepository, MetalPriceRepository, QuoteRepository, SettingsRepository,
    StoreRepository, VendorAuthLogRepository, VendorPriceListRepository, VendorTokenRepository,
};

pub struct AppState {
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub store_service: Arc<dyn StoreServiceTrait>,
    pub pricing_cache_service: Arc<dyn PricingCacheServiceTrait>,
    pub metal_service: Arc<dyn MetalServiceTrait>,
    pub diamond_service: Arc<dyn DiamondServiceTrait>,
    pub vendor_service: Arc<dyn VendorServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("WB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let settings_repository = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let settings_service: Arc<dyn SettingsServiceTrait> =
        Arc::new(SettingsService::new(settings_repository));

    let store_repository = Arc::new(StoreRepository::new(pool.clone(), writer.clone()));
    let metal_repository = Arc::new(MetalPriceRepository::new(pool.clone(), writer.clone()));

    // One cache store shared by the refresh path and the metal resolver
    let cache_store = Arc::new(InMemoryPricingCache::new());
    let pricing_cache_service: Arc<dyn PricingCacheServiceTrait> = Arc::new(
        PricingCacheService::new(metal_repository.clone(), cache_store.clone()),
    );

    let store_service: Arc<dyn StoreServiceTrait> = Arc::new(StoreService::new(
        store_repository.clone(),
        pricing_cache_service.clone(),
    ));

    if config.metals_api_key.is_none() {
        tracing::warn!("WB_METALS_API_KEY is not set; metal price sync is unavailable");
    }
    let metals_provider = Arc::new(MetalPriceApiProvider::new(config.metals_api_key.clone()));
    let metal_service: Arc<dyn MetalServiceTrait> = Arc::new(MetalService::new(
        metal_repository,
        metals_provider,
        store_repository.clone(),
        cache_store,
        settings_service.clone(),
    ));

    let vendor_list_repository =
        Arc::new(VendorPriceListRepository::new(pool.clone(), writer.clone()));
    let diamond_service: Arc<dyn DiamondServiceTrait> = Arc::new(DiamondService::new(
        Arc::new(DiamondPriceRepository::new(pool.clone(), writer.clone())),
        vendor_list_repository.clone(),
        settings_service.clone(),
    ));

    let vendor_service: Arc<dyn VendorServiceTrait> = Arc::new(VendorService::new(
        Arc::new(RapaportProvider::new(config.vendor_oauth())),
        Arc::new(VendorTokenRepository::new(pool.clone(), writer.clone())),
        Arc::new(VendorAuthLogRepository::new(pool.clone(), writer.clone())),
        vendor_list_repository,
        store_repository.clone(),
    ));

    let quote_service: Arc<dyn QuoteServiceTrait> = Arc::new(QuoteService::new(
        Arc::new(QuoteRepository::new(pool.clone(), writer.clone())),
        store_repository,
        metal_service.clone(),
        diamond_service.clone(),
    ));

    Ok(Arc::new(AppState {
        settings_service,
        store_service,
        pricing_cache_service,
        metal_service,
        diamond_service,
        vendor_service,
        quote_service,
    }))
}
