//! Key-value persistence collaborator.
//!
//! The service owns no durable state of its own; the property record, admin
//! sessions, and view counters all live behind [`KvStore`]. `HttpKv` speaks
//! the Upstash-style REST command protocol the hosted store exposes;
//! `MemoryKv` backs tests and local development.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected store response: {0}")]
    Protocol(String),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Set `key` to `value`, with an optional time-to-live.
    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), StoreError>;

    async fn del(&self, key: &str) -> Result<(), StoreError>;

    /// Atomically increment an integer counter, creating it at 1.
    async fn incr(&self, key: &str) -> Result<i64, StoreError>;

    /// List keys matching a `*`-glob pattern.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ─────────────────────────────────────────────────────────────────────────────

struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

#[derive(Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, Entry>>,
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let mut entries = self.entries.write().await;
        let current = match entries.get(key).filter(|entry| !entry.expired()) {
            Some(entry) => entry
                .value
                .as_i64()
                .ok_or_else(|| StoreError::Protocol(format!("{key} holds a non-integer value")))?,
            None => 0,
        };
        let next = current + 1;
        entries.insert(
            key.to_string(),
            Entry {
                value: Value::from(next),
                expires_at: None,
            },
        );
        Ok(next)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(key, entry)| !entry.expired() && glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Minimal `*`-glob matcher, enough for key patterns like `views:*`.
fn glob_match(pattern: &str, value: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == value;
    }

    let mut rest = value;
    let last = parts.len() - 1;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(part) {
                Some(tail) => rest = tail,
                None => return false,
            }
        } else if i == last {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
    }
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// REST backend
// ─────────────────────────────────────────────────────────────────────────────

/// REST client for an Upstash-style key-value service.
///
/// Commands are path-encoded (`/get/{key}`, `/set/{key}`, `/incr/{key}`,
/// `/keys/{pattern}`) and responses arrive as `{"result": ...}`. Values are
/// stored JSON-encoded, matching the contract of the site's original client.
pub struct HttpKv {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpKv {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn command(&self, path: &str, body: Option<String>) -> Result<Value, StoreError> {
        let url = format!("{}/{}", self.base_url, path);
        let request = match body {
            Some(body) => self.client.post(&url).body(body),
            None => self.client.get(&url),
        };
        let response = request.bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Protocol(format!(
                "command {path} returned status {status}"
            )));
        }

        let payload: Value = response.json().await?;
        payload
            .get("result")
            .cloned()
            .ok_or_else(|| StoreError::Protocol(format!("command {path} returned no result")))
    }
}

#[async_trait]
impl KvStore for HttpKv {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match self.command(&format!("get/{key}"), None).await? {
            Value::Null => Ok(None),
            // Stored values are JSON-encoded strings; anything else is
            // passed through as-is.
            Value::String(raw) => Ok(Some(
                serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
            )),
            other => Ok(Some(other)),
        }
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), StoreError> {
        let path = match ttl {
            Some(ttl) => format!("set/{key}?EX={}", ttl.as_secs().max(1)),
            None => format!("set/{key}"),
        };
        self.command(&path, Some(value.to_string())).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        self.command(&format!("del/{key}"), None).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let result = self.command(&format!("incr/{key}"), None).await?;
        result
            .as_i64()
            .ok_or_else(|| StoreError::Protocol(format!("incr/{key} returned a non-integer")))
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let result = self.command(&format!("keys/{pattern}"), None).await?;
        let items = result
            .as_array()
            .ok_or_else(|| StoreError::Protocol("keys returned a non-array".to_string()))?;
        Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect())
    }
}
