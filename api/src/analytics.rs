//! Page-view counters.
//!
//! A peripheral feature: counters live under `views:{page}` keys and failures
//! degrade to zero/empty responses rather than errors, so a store outage
//! never breaks the public page.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use shared::models::PageViews;

use crate::{
    state::AppState,
    validation::{validate_page_id, ValidationError},
};

const VIEW_KEY_PREFIX: &str = "views:";

pub async fn record_view(State(state): State<AppState>, Path(page): Path<String>) -> Response {
    if let Err(message) = validate_page_id(&page) {
        return ValidationError::single("page", message).into_response();
    }

    let views = match state.kv.incr(&format!("{VIEW_KEY_PREFIX}{page}")).await {
        Ok(views) => views,
        Err(err) => {
            tracing::warn!(error = ?err, page = %page, "view increment failed");
            0
        }
    };

    Json(PageViews { page, views }).into_response()
}

pub async fn list_views(State(state): State<AppState>) -> Json<Vec<PageViews>> {
    let keys = match state.kv.keys(&format!("{VIEW_KEY_PREFIX}*")).await {
        Ok(keys) => keys,
        Err(err) => {
            tracing::warn!(error = ?err, "view listing failed");
            return Json(vec![]);
        }
    };

    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        let views = match state.kv.get(&key).await {
            Ok(Some(value)) => value.as_i64().unwrap_or(0),
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!(error = ?err, key = %key, "view read failed");
                0
            }
        };
        let page = key.trim_start_matches(VIEW_KEY_PREFIX).to_string();
        entries.push(PageViews { page, views });
    }

    entries.sort_by(|a, b| b.views.cmp(&a.views));
    Json(entries)
}
