#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use delivery_planner::config::EnvironmentConfig;
use delivery_planner::database::MemoryDocumentStore;
use delivery_planner::{create_app, AppState};

pub fn test_state() -> AppState {
    AppState::new(Arc::new(MemoryDocumentStore::new()), EnvironmentConfig::default())
}

pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl TestResponse {
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

pub async fn create_test_app() -> TestApp {
    TestApp {
        router: create_app(test_state()),
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Option<Value>) -> TestResponse {
        self.request(Method::PATCH, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}

pub fn package_body(tracking_number: &str) -> Value {
    serde_json::json!({
        "tracking_number": tracking_number,
        "customer_name": "Carol",
        "customer_address": "1 Main St",
        "customer_phone": "555-0100",
        "weight_kg": 2.0,
        "volume_m3": 0.1
    })
}
