use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use wisebuy_core::pricing_cache::PricingCacheSnapshot;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClearCacheResponse {
    cleared: bool,
}

/// The store's snapshot, or `null` when none has been built yet.
async fn get_cache(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<PricingCacheSnapshot>>> {
    // unknown stores are a 404, not an empty cache
    state.store_service.get_store(&id)?;
    Ok(Json(state.pricing_cache_service.load_cache(&id)))
}

async fn refresh_cache(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PricingCacheSnapshot>> {
    let config = state.store_service.pricing_config(&id)?;
    let snapshot = state.pricing_cache_service.update_cache(&config)?;
    Ok(Json(snapshot))
}

async fn clear_cache(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ClearCacheResponse>> {
    let cleared = state.pricing_cache_service.clear_cache(&id);
    Ok(Json(ClearCacheResponse { cleared }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/stores/{id}/pricing-cache",
            get(get_cache).delete(clear_cache),
        )
        .route("/stores/{id}/pricing-cache/refresh", post(refresh_cache))
}
