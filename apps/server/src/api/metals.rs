use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wisebuy_core::metals::{
    purity_table, BackfillResult, BackfillStatus, MetalPriceRecord, MetalSyncResult, MetalType,
    PricingBasis, PurityPrice, ResolvedMetalPrice,
};

use crate::{error::ApiResult, main_lib::AppState};

const DEFAULT_HISTORY_DAYS: i64 = 30;
const DEFAULT_BACKFILL_DAYS: i64 = 180;

#[derive(Deserialize)]
struct HistoryQuery {
    metal: String,
    days: Option<i64>,
}

#[derive(Deserialize)]
struct DaysQuery {
    days: Option<i64>,
}

#[derive(Deserialize)]
struct BackfillBody {
    days: Option<i64>,
}

#[derive(Deserialize)]
struct MetalQuery {
    metal: String,
}

#[derive(Deserialize)]
struct BasisQuery {
    basis: Option<String>,
}

#[derive(Deserialize)]
struct ResolveQuery {
    metal: String,
    purity: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PurityView {
    label: &'static str,
    fraction_of_pure: Decimal,
}

async fn latest_prices(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MetalPriceRecord>>> {
    let prices = state.metal_service.latest_prices()?;
    Ok(Json(prices))
}

async fn price_history(
    State(state): State<Arc<AppState>>,
    Query(q): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<MetalPriceRecord>>> {
    let metal: MetalType = q.metal.parse()?;
    let history = state
        .metal_service
        .price_history(metal, q.days.unwrap_or(DEFAULT_HISTORY_DAYS))?;
    Ok(Json(history))
}

async fn basis_prices(
    State(state): State<Arc<AppState>>,
    Query(q): Query<BasisQuery>,
) -> ApiResult<Json<Vec<MetalPriceRecord>>> {
    let basis = match q.basis {
        Some(b) => b.parse()?,
        None => PricingBasis::default(),
    };
    let prices = state.metal_service.basis_prices(basis)?;
    Ok(Json(prices))
}

async fn sync_prices(State(state): State<Arc<AppState>>) -> ApiResult<Json<MetalSyncResult>> {
    let result = state.metal_service.sync_metal_prices().await?;
    Ok(Json(result))
}

async fn backfill(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BackfillBody>,
) -> ApiResult<Json<BackfillResult>> {
    let result = state
        .metal_service
        .backfill_price_history(body.days.unwrap_or(DEFAULT_BACKFILL_DAYS))
        .await?;
    Ok(Json(result))
}

async fn backfill_status(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DaysQuery>,
) -> ApiResult<Json<Vec<BackfillStatus>>> {
    let status = state
        .metal_service
        .backfill_status(q.days.unwrap_or(DEFAULT_BACKFILL_DAYS))?;
    Ok(Json(status))
}

async fn purities(Query(q): Query<MetalQuery>) -> ApiResult<Json<Vec<PurityView>>> {
    let metal: MetalType = q.metal.parse()?;
    let grades = purity_table(metal)
        .iter()
        .map(|p| PurityView {
            label: p.label,
            fraction_of_pure: p.fraction_of_pure,
        })
        .collect();
    Ok(Json(grades))
}

async fn resolve_price(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<ResolveQuery>,
) -> ApiResult<Json<ResolvedMetalPrice>> {
    let metal: MetalType = q.metal.parse()?;
    let resolved = state.metal_service.resolve_price(&id, metal, &q.purity)?;
    Ok(Json(resolved))
}

async fn purity_prices(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<MetalQuery>,
) -> ApiResult<Json<Vec<PurityPrice>>> {
    let metal: MetalType = q.metal.parse()?;
    let prices = state.metal_service.purity_prices(&id, metal)?;
    Ok(Json(prices))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/metals/latest", get(latest_prices))
        .route("/metals/history", get(price_history))
        .route("/metals/basis-prices", get(basis_prices))
        .route("/metals/sync", post(sync_prices))
        .route("/metals/backfill", post(backfill))
        .route("/metals/backfill-status", get(backfill_status))
        .route("/metals/purities", get(purities))
        .route("/stores/{id}/metals/resolve", get(resolve_price))
        .route("/stores/{id}/metals/purity-prices", get(purity_prices))
}
