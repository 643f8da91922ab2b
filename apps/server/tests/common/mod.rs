#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use wisebuy_server::{api::app_router, build_state, config::Config};

pub struct TestApp {
    pub router: Router,
    // keeps the database directory alive for the test
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(10),
        metals_api_key: None,
        metals_sync_interval: None,
        vendor_client_id: None,
        vendor_client_secret: None,
        vendor_redirect_uri: None,
    }
}

pub async fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    /// Registers a store and returns its id.
    pub async fn register_store(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/stores",
                serde_json::json!({
                    "name": "Main Street Jewelers",
                    "address": "1 Main St",
                    "phone": "555-0100",
                    "adminEmail": email,
                    "adminName": "Pat Owner",
                    "adminPassword": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Registers and approves a store, returning its id.
    pub async fn active_store(&self, email: &str) -> String {
        let id = self.register_store(email, "correct-horse").await;
        let (status, _) = self
            .post(&format!("/api/v1/stores/{}/approve", id), Value::Null)
            .await;
        assert_eq!(status, StatusCode::OK);
        id
    }
}
