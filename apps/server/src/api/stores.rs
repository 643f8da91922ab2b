use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use wisebuy_core::{
    metals::StorePricingConfig,
    stores::{NewStore, PricingSettingsUpdate, Store},
};

use crate::{
    auth::hash_password,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterStoreRequest {
    #[serde(flatten)]
    store: NewStore,
    admin_password: String,
}

async fn list_stores(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Store>>> {
    let stores = state.store_service.list_stores()?;
    Ok(Json(stores))
}

async fn register_store(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterStoreRequest>,
) -> ApiResult<Json<Store>> {
    if body.admin_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "Admin password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    let mut new_store = body.store;
    new_store.admin_password_hash = hash_password(&body.admin_password)?;
    let store = state.store_service.register_store(new_store).await?;
    Ok(Json(store))
}

async fn get_store(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Store>> {
    let store = state.store_service.get_store(&id)?;
    Ok(Json(store))
}

async fn approve_store(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Store>> {
    let store = state.store_service.approve_store(&id).await?;
    Ok(Json(store))
}

async fn reject_store(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Store>> {
    let store = state.store_service.reject_store(&id).await?;
    Ok(Json(store))
}

async fn get_pricing_config(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StorePricingConfig>> {
    let config = state.store_service.pricing_config(&id)?;
    Ok(Json(config))
}

async fn update_pricing_settings(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<PricingSettingsUpdate>,
) -> ApiResult<Json<Store>> {
    let store = state
        .store_service
        .update_pricing_settings(&id, update)
        .await?;
    Ok(Json(store))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stores", get(list_stores).post(register_store))
        .route("/stores/{id}", get(get_store))
        .route("/stores/{id}/approve", post(approve_store))
        .route("/stores/{id}/reject", post(reject_store))
        .route("/stores/{id}/pricing-config", get(get_pricing_config))
        .route("/stores/{id}/pricing-settings", put(update_pricing_settings))
}
