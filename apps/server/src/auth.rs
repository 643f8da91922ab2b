//! Store administrator login.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{info, warn};
use wisebuy_core::stores::{Store, StoreStatus};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Hashes an administrator password for storage.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is unreadable: {}", e);
            false
        }
    }
}

/// Checks the credentials of a store administrator. Only active stores may
/// log in.
pub fn authenticate_admin(state: &AppState, email: &str, password: &str) -> ApiResult<Store> {
    let email = email.trim().to_lowercase();
    let store = state
        .store_service
        .find_by_admin_email(&email)?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(password, &store.admin_password_hash) {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }
    if store.status != StoreStatus::Active {
        return Err(ApiError::Forbidden(format!(
            "Store is {} and cannot sign in",
            store.status
        )));
    }
    Ok(store)
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<Store>> {
    let store = authenticate_admin(&state, &body.email, &body.password)?;
    info!("Store {} administrator signed in", store.id);
    Ok(Json(store))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/login", post(login))
}
