pub mod analytics;
pub mod auth;
pub mod auth_handlers;
pub mod blob;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod metrics_handler;
pub mod observability;
pub mod routes;
pub mod state;
pub mod store;
pub mod upload_handlers;
pub mod validation;
