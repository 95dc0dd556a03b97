use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;

use api::blob::{BlobStore, HttpBlob, MemoryBlob};
use api::observability::Observability;
use api::routes;
use api::state::{AppConfig, AppState};
use api::store::{HttpKv, KvStore, MemoryKv};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init()?;
    let config = AppConfig::from_env();

    let kv: Arc<dyn KvStore> = match (&config.kv_rest_url, &config.kv_rest_token) {
        (Some(url), Some(token)) => {
            tracing::info!("using REST kv store at {url}");
            Arc::new(HttpKv::new(url.clone(), token.clone()))
        }
        _ => {
            tracing::warn!("KV_REST_API_URL/TOKEN not set, using in-memory store");
            Arc::new(MemoryKv::default())
        }
    };

    let blobs: Arc<dyn BlobStore> = match (&config.blob_base_url, &config.blob_token) {
        (Some(url), Some(token)) => {
            tracing::info!("using REST blob store at {url}");
            Arc::new(HttpBlob::new(url.clone(), token.clone()))
        }
        _ => {
            tracing::warn!("BLOB_STORE_URL/TOKEN not set, using in-memory blob store");
            Arc::new(MemoryBlob::new("memory://blobs"))
        }
    };

    let port = config.port;
    let state = AppState::new(kv, blobs, config, obs.registry);
    let app = routes::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
