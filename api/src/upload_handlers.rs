use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use shared::models::UploadImageRequest;

use crate::{
    error::ApiError,
    metrics,
    state::AppState,
    validation::{validate_upload, ValidatedJson},
};

/// Accept a base64 image upload, validate it, and store it in the blob
/// service. The response carries the public URL and the derived file name;
/// the client attaches both to the property record itself.
pub async fn upload_image(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UploadImageRequest>,
) -> Response {
    // Presence is guaranteed by the request's Validatable impl.
    let image_data = req.image_data.as_deref().unwrap_or_default();
    let image_name = req.image_name.as_deref().unwrap_or_default();

    let timestamp_ms = chrono::Utc::now().timestamp_millis();
    let decoded = match validate_upload(image_data, image_name, timestamp_ms) {
        Ok(decoded) => decoded,
        Err(err) => {
            metrics::UPLOAD_REJECTED_TOTAL.inc();
            metrics::VALIDATION_FAILURES_TOTAL
                .with_label_values(&["upload-image"])
                .inc();
            return err.into_response();
        }
    };

    let size = decoded.bytes.len();
    match state
        .blobs
        .put(&decoded.file_name, decoded.bytes, &decoded.content_type)
        .await
    {
        Ok(blob) => {
            metrics::UPLOADS_TOTAL.inc();
            tracing::info!(
                file_name = %decoded.file_name,
                content_type = %decoded.content_type,
                bytes = size,
                "image uploaded"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "url": blob.url,
                    "fileName": decoded.file_name,
                })),
            )
                .into_response()
        }
        Err(err) => {
            metrics::BLOB_ERRORS_TOTAL.inc();
            tracing::error!(error = ?err, "blob upload failed");
            ApiError::internal("Upload failed").into_response()
        }
    }
}
