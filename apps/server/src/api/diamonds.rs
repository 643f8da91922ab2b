use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use wisebuy_core::diamonds::{
    CsvUploadSummary, DiamondPriceEntry, DiamondPriceResult, DiamondSpecs, PriceEntryCount,
    ShapeType, VendorPriceList, VendorPriceListStatus,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn upload_price_csv(
    Path(shape_type): Path<String>,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<CsvUploadSummary>> {
    let shape_type: ShapeType = shape_type.parse()?;
    let mut file_content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() == Some("file") {
            let bytes = field.bytes().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read file content: {}", e))
            })?;
            file_content = Some(bytes.to_vec());
        }
    }

    let content = file_content
        .ok_or_else(|| ApiError::BadRequest("Missing file in multipart request".to_string()))?;
    let summary = state
        .diamond_service
        .upload_price_csv(shape_type, &content)
        .await?;
    Ok(Json(summary))
}

async fn list_entries(
    Path(shape_type): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<DiamondPriceEntry>>> {
    let shape_type: ShapeType = shape_type.parse()?;
    let entries = state.diamond_service.list_entries(shape_type)?;
    Ok(Json(entries))
}

async fn entry_counts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PriceEntryCount>>> {
    let counts = state.diamond_service.entry_counts()?;
    Ok(Json(counts))
}

async fn resolve_price(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(specs): Json<DiamondSpecs>,
) -> ApiResult<Json<DiamondPriceResult>> {
    let result = state.diamond_service.resolve_price(&id, &specs)?;
    Ok(Json(result))
}

async fn vendor_list_status(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<VendorPriceListStatus>>> {
    let status = state.diamond_service.vendor_price_list_status(&id)?;
    Ok(Json(status))
}

async fn refresh_vendor_list(
    Path((id, list_type)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<VendorPriceList>> {
    let list_type: ShapeType = list_type.parse()?;
    let list = state
        .vendor_service
        .refresh_price_list(&id, list_type)
        .await?;
    Ok(Json(list))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/diamonds/price-counts", get(entry_counts))
        .route("/diamonds/prices/{shape_type}", get(list_entries))
        .route("/diamonds/prices/{shape_type}/upload", post(upload_price_csv))
        .route("/stores/{id}/diamonds/resolve", post(resolve_price))
        .route("/stores/{id}/diamonds/vendor-lists", get(vendor_list_status))
        .route(
            "/stores/{id}/diamonds/vendor-lists/{list_type}/refresh",
            post(refresh_vendor_list),
        )
}
