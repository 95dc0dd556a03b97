use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use shared::models::AuthRequest;

use crate::{
    auth::session_key,
    error::ApiError,
    metrics,
    state::AppState,
    validation::ValidatedJson,
};

/// Delay applied to failed attempts to damp brute forcing.
const FAILED_LOGIN_DELAY: Duration = Duration::from_secs(1);

/// Admin login: compare the password, mint an opaque session token, and
/// store it in the KV with the session TTL.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AuthRequest>,
) -> Response {
    let password = req.password.as_deref().unwrap_or_default();

    if !state.auth.is_configured() {
        tracing::error!("ADMIN_PASSWORD is not configured");
        return ApiError::internal("Server configuration error").into_response();
    }

    if !state.auth.verify_password(password) {
        metrics::AUTH_ATTEMPTS_TOTAL
            .with_label_values(&["rejected"])
            .inc();
        tokio::time::sleep(FAILED_LOGIN_DELAY).await;
        return ApiError::unauthorized("InvalidCredentials", "Invalid credentials").into_response();
    }

    let token = state.auth.mint_token();
    if let Err(err) = state
        .kv
        .set(&session_key(&token), Value::Bool(true), Some(state.auth.session_ttl))
        .await
    {
        metrics::KV_ERRORS_TOTAL.inc();
        tracing::error!(error = ?err, "failed to store session token");
        return ApiError::internal("An unexpected storage error occurred").into_response();
    }

    metrics::AUTH_ATTEMPTS_TOTAL
        .with_label_values(&["accepted"])
        .inc();
    tracing::info!("admin session issued");

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "token": token,
            "expiresIn": state.auth.session_ttl.as_secs(),
        })),
    )
        .into_response()
}
