#![allow(dead_code)]

use api_rest::{router, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use clinicals_core::{Repositories, SqliteStore};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn memory_app() -> Router {
    router(AppState::new(Repositories::in_memory()))
}

pub fn sqlite_app() -> Router {
    let store = SqliteStore::open_in_memory().expect("in-memory sqlite should open");
    router(AppState::new(Repositories::from_store(Arc::new(store))))
}

/// Sends one request and returns the status with the decoded JSON body
/// (`Value::Null` when the body is empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).expect("json should encode")))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should not fail");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, json)
}

pub async fn create_patient(app: &Router, first: &str, last: &str, age: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/patients",
        Some(serde_json::json!({"firstName": first, "lastName": last, "age": age})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["id"].as_i64().expect("created patient should have an id")
}
