use std::time::Instant;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    analytics, auth, auth_handlers, handlers, metrics, metrics_handler, state::AppState,
    upload_handlers,
};

/// Assemble the full application router. Shared by the binary and the
/// integration tests.
pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route(
            "/api/property",
            post(handlers::update_property)
                .put(handlers::update_property)
                .delete(handlers::reset_property),
        )
        .route("/api/upload-image", post(upload_handlers::upload_image))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/api/property", get(handlers::get_property))
        .route("/api/auth", post(auth_handlers::login))
        .route("/api/views", get(analytics::list_views))
        .route("/api/views/:page", post(analytics::record_view))
        .route("/health", get(handlers::health_check))
        .route("/api/stats", get(handlers::get_stats))
        .route("/metrics", get(metrics_handler::metrics_endpoint))
        .merge(admin)
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(request_logger))
        .layer(cors_layer(&state.config.allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn request_logger(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    metrics::observe_http(method.as_str(), uri.path(), status, elapsed.as_secs_f64());
    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());

    response
}
