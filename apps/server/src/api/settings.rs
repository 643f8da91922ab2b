use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use wisebuy_core::settings::{Settings, SettingsUpdate};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_settings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Settings>> {
    let settings = state.settings_service.get_settings()?;
    Ok(Json(settings))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<Json<Settings>> {
    let settings = state.settings_service.update_settings(&update).await?;
    Ok(Json(settings))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
