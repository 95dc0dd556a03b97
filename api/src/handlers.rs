use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use shared::seed::default_property;

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    state::AppState,
    store::StoreError,
    validation::validate_property,
};

/// Fixed store key of the singleton property record.
pub const PROPERTY_KEY: &str = "property";

fn kv_internal_error(operation: &str, err: StoreError) -> ApiError {
    metrics::KV_ERRORS_TOTAL.inc();
    tracing::error!(operation = operation, error = ?err, "kv operation failed");
    ApiError::internal("An unexpected storage error occurred")
}

fn map_json_rejection(err: JsonRejection) -> ApiError {
    ApiError::bad_request("InvalidRequest", format!("Invalid JSON payload: {}", err.body_text()))
}

fn seed_value() -> Value {
    serde_json::to_value(default_property()).expect("seed record serializes")
}

/// Read the property record, seeding the store with the default on first
/// access.
pub async fn get_property(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    metrics::PROPERTY_READS_TOTAL.inc();

    if let Some(property) = state
        .kv
        .get(PROPERTY_KEY)
        .await
        .map_err(|err| kv_internal_error("get property", err))?
    {
        return Ok(Json(property));
    }

    let seeded = seed_value();
    state
        .kv
        .set(PROPERTY_KEY, seeded.clone(), None)
        .await
        .map_err(|err| kv_internal_error("seed property", err))?;
    tracing::info!("property record seeded with default data");

    Ok(Json(seeded))
}

/// Replace the property record. The body is the full record; it is validated
/// against the raw input and persisted deeply sanitized.
pub async fn update_property(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(record) = match payload {
        Ok(payload) => payload,
        Err(err) => return map_json_rejection(err).into_response(),
    };

    let sanitized = match validate_property(record) {
        Ok(record) => record,
        Err(err) => {
            metrics::VALIDATION_FAILURES_TOTAL
                .with_label_values(&["property"])
                .inc();
            return err.into_response();
        }
    };

    if let Err(err) = state.kv.set(PROPERTY_KEY, sanitized.clone(), None).await {
        return kv_internal_error("set property", err).into_response();
    }
    metrics::PROPERTY_WRITES_TOTAL.inc();
    tracing::info!("property record replaced");

    (
        StatusCode::OK,
        Json(json!({
            "message": "Property updated successfully",
            "property": sanitized,
        })),
    )
        .into_response()
}

/// Reset the property record to the seed default. Seed data is trusted and
/// bypasses the validator.
pub async fn reset_property(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let seeded = seed_value();
    state
        .kv
        .set(PROPERTY_KEY, seeded.clone(), None)
        .await
        .map_err(|err| kv_internal_error("reset property", err))?;
    metrics::PROPERTY_RESETS_TOTAL.inc();
    tracing::info!("property record reset to default");

    Ok(Json(json!({
        "message": "Property reset to default",
        "property": seeded,
    })))
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();

    let kv_ok = state.kv.get("health:ping").await.is_ok();

    if kv_ok {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": now,
                "uptime_secs": uptime,
            })),
        )
    } else {
        tracing::warn!(uptime_secs = uptime, "health check degraded — kv unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": now,
                "uptime_secs": uptime,
            })),
        )
    }
}

pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let property = state
        .kv
        .get(PROPERTY_KEY)
        .await
        .map_err(|err| kv_internal_error("get property", err))?;

    let images = property
        .as_ref()
        .and_then(|p| p.get("images"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    let amenities = property
        .as_ref()
        .and_then(|p| p.get("amenities"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let mut total_views: i64 = 0;
    let view_keys = state
        .kv
        .keys("views:*")
        .await
        .map_err(|err| kv_internal_error("list view keys", err))?;
    for key in view_keys {
        if let Ok(Some(count)) = state.kv.get(&key).await {
            total_views += count.as_i64().unwrap_or(0);
        }
    }

    Ok(Json(json!({
        "property_seeded": property.is_some(),
        "images": images,
        "amenities": amenities,
        "total_views": total_views,
    })))
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("NotFound", "Route not found")
}
