//! Session cart tests.

use axum::http::StatusCode;

use artconnect_core::{ArtworkId, Cart};
use artconnect_integration_tests::{TestApp, json};

fn cart_of(body: &serde_json::Value) -> Cart {
    serde_json::from_value(body.clone()).unwrap_or_default()
}

#[tokio::test]
async fn test_empty_cart() {
    let mut app = TestApp::new();

    let response = app.get("/api/cart").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalItems"], 0);
    assert_eq!(response.body["totalPrice"], 0.0);
    assert_eq!(response.body["currency"], "HKD");

    let count = app.get("/api/cart/count").await;
    assert_eq!(count.body, json!({ "count": 0 }));
}

#[tokio::test]
async fn test_adding_twice_keeps_one_line_and_quantity() {
    let mut app = TestApp::new();

    app.post_json("/api/cart/add", &json!({ "artworkId": "1" }))
        .await;
    app.post_json("/api/cart/update", &json!({ "artworkId": "1", "quantity": 3 }))
        .await;
    let response = app
        .post_json("/api/cart/add", &json!({ "artworkId": "1" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let cart = cart_of(&response.body);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&ArtworkId::new("1")).map(|i| i.quantity), Some(3));
    assert_eq!(response.body["totalPrice"], 3600.0);
}

#[tokio::test]
async fn test_quantity_zero_removes_item() {
    let mut app = TestApp::new();

    app.post_json("/api/cart/add", &json!({ "artworkId": "1" }))
        .await;
    app.post_json("/api/cart/add", &json!({ "artworkId": "2" }))
        .await;

    let response = app
        .post_json("/api/cart/update", &json!({ "artworkId": "2", "quantity": 0 }))
        .await;

    let cart = cart_of(&response.body);
    assert_eq!(cart.len(), 1);
    assert!(!cart.contains(&ArtworkId::new("2")));
    assert_eq!(response.body["totalItems"], 1);
}

#[tokio::test]
async fn test_unknown_artwork_is_not_found() {
    let mut app = TestApp::new();

    let response = app
        .post_json("/api/cart/add", &json!({ "artworkId": "999" }))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), Some("Artwork not found"));

    let response = app
        .post_json("/api/cart/update", &json!({ "artworkId": "1", "quantity": 2 }))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let mut app = TestApp::new();

    for id in ["1", "2", "8"] {
        app.post_json("/api/cart/add", &json!({ "artworkId": id }))
            .await;
    }
    assert_eq!(app.get("/api/cart/count").await.body["count"], 3);

    let response = app
        .post_json("/api/cart/remove", &json!({ "artworkId": "8" }))
        .await;
    assert_eq!(cart_of(&response.body).len(), 2);
    assert_eq!(response.body["totalPrice"], 2000.0);

    let response = app.post_json("/api/cart/clear", &json!({})).await;
    assert_eq!(response.body["totalItems"], 0);
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let mut alice = TestApp::new();
    let mut bob = alice.new_client();

    alice
        .post_json("/api/cart/add", &json!({ "artworkId": "3" }))
        .await;

    assert_eq!(alice.get("/api/cart/count").await.body["count"], 1);
    assert_eq!(bob.get("/api/cart/count").await.body["count"], 0);
}
