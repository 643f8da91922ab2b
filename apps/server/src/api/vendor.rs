use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wisebuy_core::vendor::{AuthLogEvent, DiagnosticsReport, VendorConnectionStatus};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizeUrlResponse {
    url: String,
}

#[derive(Deserialize)]
struct ExchangeBody {
    code: String,
    state: String,
}

#[derive(Deserialize)]
struct AuthLogQuery {
    limit: Option<i64>,
}

async fn authorize_url(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AuthorizeUrlResponse>> {
    let url = state.vendor_service.authorization_url(&id).await?;
    Ok(Json(AuthorizeUrlResponse { url }))
}

async fn exchange_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExchangeBody>,
) -> ApiResult<Json<VendorConnectionStatus>> {
    let status = state
        .vendor_service
        .exchange_code(&body.code, &body.state)
        .await?;
    Ok(Json(status))
}

async fn refresh_token(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<VendorConnectionStatus>> {
    let status = state.vendor_service.refresh_token(&id).await?;
    Ok(Json(status))
}

async fn connection_status(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<VendorConnectionStatus>> {
    let status = state.vendor_service.connection_status(&id)?;
    Ok(Json(status))
}

async fn disconnect(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.vendor_service.disconnect(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn auth_log(
    State(state): State<Arc<AppState>>,
    Query(q): Query<AuthLogQuery>,
) -> ApiResult<Json<Vec<AuthLogEvent>>> {
    let events = state.vendor_service.auth_log(q.limit)?;
    Ok(Json(events))
}

async fn run_diagnostics(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DiagnosticsReport>> {
    let report = state.vendor_service.run_diagnostics(&id).await?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vendor/oauth/exchange", post(exchange_code))
        .route("/vendor/auth-log", get(auth_log))
        .route("/stores/{id}/vendor/authorize-url", get(authorize_url))
        .route("/stores/{id}/vendor/refresh", post(refresh_token))
        .route(
            "/stores/{id}/vendor",
            get(connection_status).delete(disconnect),
        )
        .route("/stores/{id}/vendor/diagnostics", post(run_diagnostics))
}
