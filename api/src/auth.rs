//! Admin authentication.
//!
//! The admin editor logs in with a single shared password; a successful
//! login mints an opaque random token stored in the key-value service with a
//! TTL, and write endpoints require it as a bearer token. With no admin
//! password configured the service runs open (local development).

use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{KvStore, StoreError};

pub const SESSION_KEY_PREFIX: &str = "auth:token:";
const TOKEN_LENGTH: usize = 48;

#[derive(Clone)]
pub struct AdminAuth {
    password_digest: Option<[u8; 32]>,
    pub session_ttl: Duration,
}

impl AdminAuth {
    pub fn new(password: Option<&str>, session_ttl: Duration) -> Self {
        Self {
            password_digest: password.map(digest),
            session_ttl,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.password_digest.is_some()
    }

    /// Compare by SHA-256 digest so the check does not depend on where the
    /// candidate diverges from the configured password.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match self.password_digest {
            Some(expected) => digest(candidate) == expected,
            None => false,
        }
    }

    pub fn mint_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().into()
}

pub fn session_key(token: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{token}")
}

/// A token is valid while its session key is live in the store; expiry is
/// the key's TTL.
pub async fn is_valid_token(kv: &dyn KvStore, token: &str) -> Result<bool, StoreError> {
    Ok(kv.get(&session_key(token)).await?.is_some())
}

/// Middleware guarding the admin write endpoints.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !state.auth.is_configured() {
        return next.run(req).await;
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return ApiError::unauthorized("Unauthorized", "Missing admin token").into_response();
    };

    match is_valid_token(state.kv.as_ref(), token).await {
        Ok(true) => next.run(req).await,
        Ok(false) => {
            ApiError::unauthorized("Unauthorized", "Invalid or expired admin token").into_response()
        }
        Err(err) => {
            tracing::error!(error = ?err, "session lookup failed");
            ApiError::internal("An unexpected storage error occurred").into_response()
        }
    }
}
