mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn login_requires_an_approved_store() {
    let app = common::build_test_app().await;
    let store_id = app
        .register_store("owner@mainstreet.example", "super-secret")
        .await;

    // pending stores cannot sign in
    let credentials = json!({ "email": "owner@mainstreet.example", "password": "super-secret" });
    let (status, _) = app.post("/api/v1/auth/login", credentials.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(&format!("/api/v1/stores/{}/approve", store_id), json!(null))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.post("/api/v1/auth/login", credentials).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], store_id.as_str());
    assert_eq!(body["status"], "active");
    assert!(body.get("adminPasswordHash").is_none());
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = common::build_test_app().await;
    app.active_store("owner@mainstreet.example").await;

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            json!({ "email": "owner@mainstreet.example", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let (status, _) = app
        .post(
            "/api/v1/auth/login",
            json!({ "email": "nobody@stores.example", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_email_is_case_insensitive() {
    let app = common::build_test_app().await;
    app.active_store("owner@mainstreet.example").await;

    let (status, _) = app
        .post(
            "/api/v1/auth/login",
            json!({ "email": " Owner@MainStreet.example ", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn registration_rejects_short_password() {
    let app = common::build_test_app().await;
    let (status, body) = app
        .post(
            "/api/v1/stores",
            json!({
                "name": "Main Street Jewelers",
                "address": "1 Main St",
                "phone": "555-0100",
                "adminEmail": "owner@mainstreet.example",
                "adminName": "Pat Owner",
                "adminPassword": "short",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}
