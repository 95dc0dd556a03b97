use once_cell::sync::Lazy;
use prometheus::{
    opts, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder,
};

macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}
macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(
                HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()),
                $labels,
            )
            .unwrap()
        })
    };
}

const LATENCY_BUCKETS: [f64; 11] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> =
    histogram_vec!("http_request_duration_seconds", "HTTP request latency", &["method", "path"]);

// ── Property record ─────────────────────────────────────────────────────────
pub static PROPERTY_READS_TOTAL: Lazy<IntCounter> =
    counter!("property_reads_total", "Property record reads");
pub static PROPERTY_WRITES_TOTAL: Lazy<IntCounter> =
    counter!("property_writes_total", "Property record replacements");
pub static PROPERTY_RESETS_TOTAL: Lazy<IntCounter> =
    counter!("property_resets_total", "Property record resets to seed");

// ── Validation / uploads ────────────────────────────────────────────────────
pub static VALIDATION_FAILURES_TOTAL: Lazy<IntCounterVec> = counter_vec!(
    "validation_failures_total",
    "Rejected client payloads",
    &["endpoint"]
);
pub static UPLOADS_TOTAL: Lazy<IntCounter> =
    counter!("uploads_total", "Images accepted and stored");
pub static UPLOAD_REJECTED_TOTAL: Lazy<IntCounter> =
    counter!("upload_rejected_total", "Image uploads rejected by validation");

// ── Auth / collaborators ────────────────────────────────────────────────────
pub static AUTH_ATTEMPTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("auth_attempts_total", "Admin login attempts", &["outcome"]);
pub static KV_ERRORS_TOTAL: Lazy<IntCounter> =
    counter!("kv_errors_total", "Key-value store call failures");
pub static BLOB_ERRORS_TOTAL: Lazy<IntCounter> =
    counter!("blob_errors_total", "Blob store call failures");

pub fn register_all(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    registry.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    registry.register(Box::new(PROPERTY_READS_TOTAL.clone()))?;
    registry.register(Box::new(PROPERTY_WRITES_TOTAL.clone()))?;
    registry.register(Box::new(PROPERTY_RESETS_TOTAL.clone()))?;
    registry.register(Box::new(VALIDATION_FAILURES_TOTAL.clone()))?;
    registry.register(Box::new(UPLOADS_TOTAL.clone()))?;
    registry.register(Box::new(UPLOAD_REJECTED_TOTAL.clone()))?;
    registry.register(Box::new(AUTH_ATTEMPTS_TOTAL.clone()))?;
    registry.register(Box::new(KV_ERRORS_TOTAL.clone()))?;
    registry.register(Box::new(BLOB_ERRORS_TOTAL.clone()))?;
    Ok(())
}

pub fn observe_http(method: &str, path: &str, status: u16, seconds: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(seconds);
}

pub fn gather_metrics(registry: &Registry) -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(err) = encoder.encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = ?err, "failed to encode metrics");
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_all_metric_families() {
        let registry = Registry::new_custom(Some("test".into()), None).unwrap();
        register_all(&registry).unwrap();
        // Vec metrics only appear after first use, so count the plain ones.
        assert!(registry.gather().len() >= 7);
    }

    #[test]
    fn metric_names_carry_the_namespace() {
        let registry = Registry::new_custom(Some("test".into()), None).unwrap();
        register_all(&registry).unwrap();
        for family in registry.gather() {
            assert!(
                family.get_name().starts_with("test_"),
                "metric {} missing prefix",
                family.get_name()
            );
        }
    }

    #[test]
    fn observe_http_records_labels() {
        observe_http("GET", "/api/property", 200, 0.001);
        let count = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/api/property", "200"])
            .get();
        assert!(count >= 1);
    }
}
