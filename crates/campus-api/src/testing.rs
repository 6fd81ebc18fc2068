//! Helpers for driving the router in unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt;

use crate::{create_router, AppState, Config};

/// A router over the built-in seed data and default configuration.
pub fn test_router() -> Router {
    create_router(AppState::new(Config::default()))
}

/// Sends one request through the router.
pub async fn oneshot(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.unwrap()
}

/// Reads a response body as JSON, or `Value::Null` when empty.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Sends a request with an optional JSON body and returns status, headers and body.
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = oneshot(router, request).await;
    let status = response.status();
    let headers = response.headers().clone();
    (status, headers, body_json(response).await)
}

/// Sends a request with a raw body and JSON content type.
pub async fn send_raw(router: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = oneshot(router, request).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// The `Link` header of a response, if any.
pub fn link(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::LINK)
        .and_then(|value| value.to_str().ok())
}
