use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use wisebuy_core::quotes::{NewQuote, PricedItem, Quote, QuoteItemRequest};

use crate::{error::ApiResult, main_lib::AppState};

async fn price_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteItemRequest>,
) -> ApiResult<Json<PricedItem>> {
    let priced = state.quote_service.price_item(&id, request)?;
    Ok(Json(priced))
}

async fn save_quote(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(new_quote): Json<NewQuote>,
) -> ApiResult<Json<Quote>> {
    let quote = state.quote_service.save_quote(&id, new_quote).await?;
    Ok(Json(quote))
}

async fn list_quotes(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Quote>>> {
    let quotes = state.quote_service.list_quotes(&id)?;
    Ok(Json(quotes))
}

async fn get_quote(
    Path((id, quote_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Quote>> {
    let quote = state.quote_service.get_quote(&id, &quote_id)?;
    Ok(Json(quote))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stores/{id}/quotes", get(list_quotes).post(save_quote))
        .route("/stores/{id}/quotes/price-item", post(price_item))
        .route("/stores/{id}/quotes/{quote_id}", get(get_quote))
}
