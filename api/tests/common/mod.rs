use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use api::blob::MemoryBlob;
use api::routes::build_router;
use api::state::{AppConfig, AppState};
use api::store::MemoryKv;

/// Build the full application router over in-memory collaborators.
pub fn test_app(admin_password: Option<&str>) -> Router {
    let registry = prometheus::Registry::new_custom(Some("test_api".into()), None).unwrap();
    api::metrics::register_all(&registry).unwrap();

    let config = AppConfig {
        admin_password: admin_password.map(str::to_string),
        ..AppConfig::default()
    };
    let state = AppState::new(
        Arc::new(MemoryKv::default()),
        Arc::new(MemoryBlob::new("https://blobs.test")),
        config,
        registry,
    );
    build_router(state)
}

/// Drive one request through the router and decode the JSON response.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
