//! Blob storage collaborator.
//!
//! Uploaded images land in an external public blob service; the service only
//! keeps the returned URL inside the property record. `HttpBlob` speaks the
//! hosted store's REST protocol; `MemoryBlob` backs tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredBlob {
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `file_name` with public access and the given
    /// content type; returns the public URL.
    async fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, StoreError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ─────────────────────────────────────────────────────────────────────────────

pub struct MemoryBlob {
    base_url: String,
    objects: RwLock<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryBlob {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a stored object as `(content_type, bytes)`.
    pub async fn object(&self, file_name: &str) -> Option<(String, Vec<u8>)> {
        self.objects.read().await.get(file_name).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlob {
    async fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, StoreError> {
        let url = format!("{}/{}", self.base_url, file_name);
        self.objects
            .write()
            .await
            .insert(file_name.to_string(), (content_type.to_string(), bytes));
        Ok(StoredBlob { url })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// REST backend
// ─────────────────────────────────────────────────────────────────────────────

/// REST client for a Vercel-Blob-style store: `PUT {base}/{pathname}` with a
/// bearer token; the JSON response carries the public `url`.
pub struct HttpBlob {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpBlob {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlob {
    async fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, StoreError> {
        let url = format!("{}/{}", self.base_url, file_name);
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .header("x-content-type", content_type)
            .header("x-access", "public")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Protocol(format!(
                "blob upload returned status {status}"
            )));
        }

        let payload: Value = response.json().await?;
        let url = payload
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Protocol("blob response carried no url".to_string()))?;

        Ok(StoredBlob {
            url: url.to_string(),
        })
    }
}
