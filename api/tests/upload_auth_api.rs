// Integration tests for image upload, admin auth, views, and metrics.

mod common;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;

use common::{request, test_app};

fn png_data_uri(len: usize) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(vec![7u8; len]))
}

#[tokio::test]
async fn upload_stores_image_and_returns_flat_name() {
    let app = test_app(None);

    let (status, body) = request(
        &app,
        "POST",
        "/api/upload-image",
        Some(json!({ "imageData": png_data_uri(200), "imageName": "Living Room_photo.png" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let file_name = body["fileName"].as_str().unwrap();
    assert!(file_name.ends_with("-Living_Room_photo.png"));
    assert!(!file_name.contains('/'));

    let url = body["url"].as_str().unwrap();
    assert_eq!(url, format!("https://blobs.test/{file_name}"));
}

#[tokio::test]
async fn upload_flattens_traversal_names() {
    let app = test_app(None);

    let (status, body) = request(
        &app,
        "POST",
        "/api/upload-image",
        Some(json!({ "imageData": png_data_uri(200), "imageName": "../../../etc/passwd.png" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let file_name = body["fileName"].as_str().unwrap();
    assert!(!file_name.contains('/'));
    assert!(file_name.ends_with(".png"));
}

#[tokio::test]
async fn upload_rejects_missing_fields() {
    let app = test_app(None);

    let (status, body) = request(&app, "POST", "/api/upload-image", Some(json!({})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing imageData or imageName");

    let (status, body) = request(
        &app,
        "POST",
        "/api/upload-image",
        Some(json!({ "imageName": "room.png" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing imageData or imageName");
}

#[tokio::test]
async fn upload_rejects_unsupported_format() {
    let app = test_app(None);

    let pdf = format!("data:application/pdf;base64,{}", BASE64.encode(vec![1u8; 200]));
    let (status, body) = request(
        &app,
        "POST",
        "/api/upload-image",
        Some(json!({ "imageData": pdf, "imageName": "doc.pdf" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid image format. Only JPEG, PNG, GIF, WebP allowed"
    );
}

#[tokio::test]
async fn upload_rejects_undersized_payload() {
    let app = test_app(None);

    let (status, body) = request(
        &app,
        "POST",
        "/api/upload-image",
        Some(json!({ "imageData": png_data_uri(50), "imageName": "tiny.png" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Image file too small");
}

#[tokio::test]
async fn upload_rejects_overlong_name() {
    let app = test_app(None);

    let (status, body) = request(
        &app,
        "POST",
        "/api/upload-image",
        Some(json!({ "imageData": png_data_uri(200), "imageName": "n".repeat(101) })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Image name too long (max 100 characters)");
}

#[tokio::test]
async fn auth_returns_500_when_unconfigured() {
    let app = test_app(None);

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth",
        Some(json!({ "password": "anything" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server configuration error");
}

#[tokio::test]
async fn auth_rejects_missing_password() {
    let app = test_app(Some("secret"));

    let (status, body) = request(&app, "POST", "/api/auth", Some(json!({})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid password format");
}

#[tokio::test]
async fn auth_rejects_wrong_password() {
    let app = test_app(Some("secret"));

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth",
        Some(json!({ "password": "wrong" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn auth_issues_token_that_gates_writes() {
    let app = test_app(Some("secret"));

    // Writes are rejected without a session.
    let (status, _) = request(
        &app,
        "POST",
        "/api/property",
        Some(json!({ "title": "Locked", "price": 1 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, "DELETE", "/api/property", None, Some("bogus")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Reads stay open.
    let (status, _) = request(&app, "GET", "/api/property", None, None).await;
    assert_eq!(status, StatusCode::OK);

    // Login, then write with the bearer token.
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth",
        Some(json!({ "password": "secret" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["expiresIn"], 86400);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, _) = request(
        &app,
        "POST",
        "/api/property",
        Some(json!({ "title": "Unlocked", "price": 1 })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&app, "DELETE", "/api/property", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn views_increment_and_list_sorted() {
    let app = test_app(None);

    let (status, body) = request(&app, "POST", "/api/views/home", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["views"], 1);

    request(&app, "POST", "/api/views/home", None, None).await;
    request(&app, "POST", "/api/views/qr", None, None).await;

    let (status, body) = request(&app, "GET", "/api/views", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0], json!({ "page": "home", "views": 2 }));
    assert_eq!(body[1], json!({ "page": "qr", "views": 1 }));
}

#[tokio::test]
async fn views_reject_non_slug_page_ids() {
    let app = test_app(None);

    let (status, _) = request(&app, "POST", "/api/views/Bad", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn metrics_endpoint_exposes_families() {
    let app = test_app(None);

    request(&app, "GET", "/api/property", None, None).await;

    let (status, body) = request(&app, "GET", "/metrics", None, None).await;
    assert_eq!(status, StatusCode::OK);
    // The exposition format is not JSON, so the helper returns Null; the
    // status code plus a direct probe below cover the contract.
    assert!(body.is_null());

    use tower::ServiceExt;
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/metrics")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("# TYPE"));
}
