//! Upload validation and AI route tests.
//!
//! Neither blob storage nor the AI service is configured here, so valid
//! requests end in the "not configured" errors.

use axum::http::StatusCode;

use artconnect_integration_tests::{TestApp, json};

const PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

fn fields<'a>(year: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", "Harbour Fog"),
        ("year", year),
        ("medium", "Ink on rice paper"),
        ("description", "Morning fog over the harbour"),
        ("artistId", "1"),
    ]
}

#[tokio::test]
async fn test_upload_requires_fields() {
    let mut app = TestApp::new();

    let response = app
        .post_multipart("/api/upload-artwork", &fields("2024"), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Missing required fields"));

    let response = app
        .post_multipart(
            "/api/upload-artwork",
            &[("title", "Untitled")],
            Some(("a.png", "image/png", PNG)),
        )
        .await;
    assert_eq!(response.error(), Some("Missing required fields"));
}

#[tokio::test]
async fn test_upload_rejects_type_and_year() {
    let mut app = TestApp::new();

    let response = app
        .post_multipart(
            "/api/upload-artwork",
            &fields("2024"),
            Some(("a.gif", "image/gif", b"GIF89a")),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error(),
        Some("File type not allowed. Please upload a JPEG, PNG, or WEBP image.")
    );

    let response = app
        .post_multipart(
            "/api/upload-artwork",
            &fields("last spring"),
            Some(("fog.png", "image/png", PNG)),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Year must be a number"));
}

#[tokio::test]
async fn test_upload_without_storage_leaves_catalog_unchanged() {
    let mut app = TestApp::new();

    let response = app
        .post_multipart(
            "/api/upload-artwork",
            &fields("2024"),
            Some(("harbour fog.png", "image/png", PNG)),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.error(),
        Some("Failed to upload artwork: blob storage is not configured")
    );

    let artworks = app.get("/api/artworks").await;
    assert_eq!(artworks.body["artworks"].as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn test_blob_check_reports_missing_token() {
    let mut app = TestApp::new();

    let response = app.get("/api/test-blob").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "Blob storage is not configured");
    assert!(response.body["details"].is_string());
}

#[tokio::test]
async fn test_ai_routes_validate_before_calling_out() {
    let mut app = TestApp::new();

    let pricing = app.post_json("/api/grok-pricing", &json!({})).await;
    assert_eq!(pricing.status, StatusCode::BAD_REQUEST);
    assert_eq!(pricing.error(), Some("Image URL is required"));

    let analyze = app.post_json("/api/analyze", &json!({ "image": "" })).await;
    assert_eq!(analyze.error(), Some("Image is required"));

    let analyze = app
        .post_json("/api/analyze", &json!({ "image": "not base64!" }))
        .await;
    assert_eq!(analyze.error(), Some("Image must be base64 encoded"));

    let chat = app
        .post_json(
            "/api/ai/chat",
            &json!({ "messages": [], "originalImage": "a", "enhancedImage": "b" }),
        )
        .await;
    assert_eq!(
        chat.error(),
        Some("Messages, original image, and enhanced image are required")
    );

    let matchmaking = app.post_json("/api/matchmaking", &json!({})).await;
    assert_eq!(matchmaking.status, StatusCode::BAD_REQUEST);
    assert_eq!(matchmaking.error(), Some("Preferences are required"));
}

#[tokio::test]
async fn test_ai_routes_without_api_key() {
    let mut app = TestApp::new();

    let responses = [
        app.post_json(
            "/api/grok-pricing",
            &json!({ "imageUrl": "https://cdn.artconnect.hk/a.jpg" }),
        )
        .await,
        app.post_json("/api/analyze", &json!({ "image": "aGVsbG8=" }))
            .await,
        app.post_json(
            "/api/ai/chat",
            &json!({
                "messages": [{ "role": "user", "content": "Brighter?" }],
                "originalImage": "a",
                "enhancedImage": "b",
            }),
        )
        .await,
        app.post_json("/api/matchmaking", &json!({ "preferences": "ink landscapes" }))
            .await,
    ];

    for response in responses {
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error(), Some("AI service is not configured"));
    }
}

#[tokio::test]
async fn test_malformed_json_uses_error_shape() {
    let mut app = TestApp::new();

    let response = app
        .request(
            axum::http::Method::POST,
            "/api/auth/login",
            axum::body::Body::from("{not json"),
            Some("application/json"),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().is_some());
}
