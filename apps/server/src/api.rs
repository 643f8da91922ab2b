use std::sync::Arc;

use axum::{extract::State, http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth, config::Config, error::ApiResult, main_lib::AppState};

pub mod diamonds;
pub mod metals;
pub mod pricing_cache;
pub mod quotes;
pub mod settings;
pub mod stores;
pub mod vendor;

pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database answers a read.
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state.settings_service.get_settings()?;
    Ok("ok")
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };
    let cors = cors.allow_methods(Any).allow_headers(Any);

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(auth::router())
        .merge(stores::router())
        .merge(pricing_cache::router())
        .merge(metals::router())
        .merge(diamonds::router())
        .merge(vendor::router())
        .merge(quotes::router())
        .merge(settings::router());

    Router::new()
        .nest("/api/v1", api.with_state(state))
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
