use std::sync::Arc;
use std::time::{Duration, Instant};

use prometheus::Registry;

use crate::auth::AdminAuth;
use crate::blob::BlobStore;
use crate::store::KvStore;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

/// Service configuration, loaded from the environment with defaults.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub admin_password: Option<String>,
    pub session_ttl_secs: u64,
    pub allowed_origins: Vec<String>,
    pub kv_rest_url: Option<String>,
    pub kv_rest_token: Option<String>,
    pub blob_base_url: Option<String>,
    pub blob_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            admin_password: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            allowed_origins: vec![
                "https://bangkokmrt.vercel.app".to_string(),
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            kv_rest_url: None,
            kv_rest_token: None,
            blob_base_url: None,
            blob_token: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                config.port = port;
            }
        }

        config.admin_password = std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());

        if let Ok(ttl_str) = std::env::var("SESSION_TTL_SECONDS") {
            if let Ok(secs) = ttl_str.parse::<u64>() {
                config.session_ttl_secs = secs;
            }
        }

        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if !origins.is_empty() {
                config.allowed_origins = origins;
            }
        }

        config.kv_rest_url = std::env::var("KV_REST_API_URL").ok();
        config.kv_rest_token = std::env::var("KV_REST_API_TOKEN").ok();
        config.blob_base_url = std::env::var("BLOB_STORE_URL").ok();
        config.blob_token = std::env::var("BLOB_READ_WRITE_TOKEN").ok();

        tracing::info!(
            "Config loaded: port={}, admin_auth={}, session_ttl={}s, origins={}",
            config.port,
            config.admin_password.is_some(),
            config.session_ttl_secs,
            config.allowed_origins.len()
        );

        config
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<dyn KvStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub auth: AdminAuth,
    pub config: Arc<AppConfig>,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(
        kv: Arc<dyn KvStore>,
        blobs: Arc<dyn BlobStore>,
        config: AppConfig,
        registry: Registry,
    ) -> Self {
        let auth = AdminAuth::new(
            config.admin_password.as_deref(),
            Duration::from_secs(config.session_ttl_secs),
        );
        Self {
            kv,
            blobs,
            auth,
            config: Arc::new(config),
            started_at: Instant::now(),
            registry,
        }
    }
}
