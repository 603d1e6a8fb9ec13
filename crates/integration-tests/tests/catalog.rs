//! Catalog, search and recommendation tests.

use axum::http::StatusCode;

use artconnect_integration_tests::{TestApp, ids, json};

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "ok");
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route_uses_error_shape() {
    let mut app = TestApp::new();
    let response = app.get("/api/nothing-here").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_list_and_filter_artworks() {
    let mut app = TestApp::new();

    let all = app.get("/api/artworks").await;
    assert_eq!(ids(&all.body["artworks"]).len(), 8);

    let by_artist = app.get("/api/artworks?artistId=1").await;
    assert_eq!(ids(&by_artist.body["artworks"]), vec!["1", "8"]);

    let cheap = app.get("/api/artworks?maxPrice=900").await;
    assert_eq!(ids(&cheap.body["artworks"]), vec!["2"]);

    let sold = app.get("/api/artworks?status=sold").await;
    assert_eq!(ids(&sold.body["artworks"]), vec!["6"]);

    let invalid = app.get("/api/artworks?minPrice=lots").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_artwork_detail_includes_artist() {
    let mut app = TestApp::new();

    let response = app.get("/api/artworks/8").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["artwork"]["title"], "Bamboo Dreams");
    assert_eq!(response.body["artist"]["id"], "1");

    let response = app.get("/api/artworks/999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), Some("Artwork not found"));
}

#[tokio::test]
async fn test_artist_artworks() {
    let mut app = TestApp::new();
    let response = app.get("/api/artists/3/artworks").await;
    assert_eq!(ids(&response.body["artworks"]), vec!["3", "6"]);
}

#[tokio::test]
async fn test_search_uses_keyword_routes_without_ai() {
    let mut app = TestApp::new();

    let response = app.get("/api/search?query=photography").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["query"], "photography");
    assert_eq!(ids(&response.body["results"]), vec!["4"]);

    let response = app.get("/api/search?query=").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Search query is required"));
}

#[tokio::test]
async fn test_suggestions_empty_without_ai() {
    let mut app = TestApp::new();

    let response = app
        .post_json("/api/search", &json!({ "partialQuery": "ink" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "suggestions": [] }));

    let response = app.post_json("/api/search", &json!({})).await;
    assert_eq!(response.error(), Some("Partial query is required"));
}

#[tokio::test]
async fn test_recommendations() {
    let mut app = TestApp::new();

    let response = app.get("/api/recommendations?artworkId=1&count=3").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["referenceArtworkId"], "1");
    assert_eq!(ids(&response.body["similarArtworks"]), vec!["8", "4", "5"]);

    let response = app.get("/api/recommendations?artworkId=1").await;
    assert_eq!(ids(&response.body["similarArtworks"]).len(), 4);

    let response = app.get("/api/recommendations").await;
    assert_eq!(response.error(), Some("Artwork ID is required"));

    let response = app.get("/api/recommendations?artworkId=999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
