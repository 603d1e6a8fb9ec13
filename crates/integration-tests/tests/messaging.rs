//! Messaging endpoint tests against the seeded conversations.
//!
//! Seed: conversation 1 is Sofia (1) and Alex (2), conversation 2 is Alex
//! and Maya (3), conversation 3 is Maya and Sofia.

use axum::http::StatusCode;

use artconnect_integration_tests::{TestApp, ids, json};

#[tokio::test]
async fn test_messaging_requires_login() {
    let mut app = TestApp::new();

    for response in [
        app.get("/api/conversations").await,
        app.get("/api/conversations/1/messages").await,
        app.post_json("/api/messages", &json!({ "receiverId": "1", "content": "hi" }))
            .await,
    ] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, json!({ "error": "Not authenticated" }));
    }
}

#[tokio::test]
async fn test_conversations_only_include_participant() {
    let mut app = TestApp::new();
    app.login("alex@buyer.com").await;

    let response = app.get("/api/conversations").await;
    assert_eq!(response.status, StatusCode::OK);

    let conversations = &response.body["conversations"];
    assert_eq!(ids(conversations), vec!["1", "2"]);
    for conversation in conversations.as_array().into_iter().flatten() {
        assert!(
            conversation["participants"]
                .as_array()
                .is_some_and(|p| p.contains(&json!("2")))
        );
    }

    // Sofia's unread reply is waiting for Alex in conversation 1.
    assert_eq!(conversations[0]["unreadCount"], 1);
    assert_eq!(conversations[0]["participant"]["name"], "Sofia Rodriguez");
}

#[tokio::test]
async fn test_messages_ordered_and_scoped() {
    let mut app = TestApp::new();
    app.login("sofia@artist.com").await;

    let response = app.get("/api/conversations/1/messages").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body["messages"]), vec!["1", "2", "3", "4"]);

    // Sofia is not part of conversation 2.
    let response = app.get("/api/conversations/2/messages").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), Some("Conversation not found"));

    let response = app.get("/api/conversations/nope/messages").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_as_read_clears_unread_count() {
    let mut app = TestApp::new();
    app.login("alex@buyer.com").await;

    let response = app.post_json("/api/conversations/1/read", &json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "updated": 1 }));

    let response = app.get("/api/conversations").await;
    assert_eq!(response.body["conversations"][0]["unreadCount"], 0);

    let response = app.post_json("/api/conversations/1/read", &json!({})).await;
    assert_eq!(response.body["updated"], 0);
}

#[tokio::test]
async fn test_send_message_reaches_recipient() {
    let mut maya = TestApp::new();
    maya.login("maya@artist.com").await;

    let response = maya
        .post_json(
            "/api/messages",
            &json!({ "receiverId": "2", "content": "  The skyline draft is ready.  " }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"]["content"], "The skyline draft is ready.");
    assert_eq!(response.body["message"]["read"], false);

    let mut alex = maya.new_client();
    alex.login("alex@buyer.com").await;
    let response = alex.get("/api/conversations").await;

    // Conversation 2 now has the newest activity.
    let conversations = &response.body["conversations"];
    assert_eq!(ids(conversations), vec!["2", "1"]);
    assert_eq!(conversations[0]["unreadCount"], 1);
    assert_eq!(
        conversations[0]["lastMessage"]["content"],
        "The skyline draft is ready."
    );
}

#[tokio::test]
async fn test_send_message_opens_new_conversation() {
    let mut app = TestApp::new();
    app.post_json(
        "/api/auth/signup",
        &json!({
            "email": "kit@buyer.com",
            "password": "pw",
            "name": "Kit Wong",
            "userType": "buyer",
        }),
    )
    .await;

    let response = app
        .post_json("/api/messages", &json!({ "receiverId": "1", "content": "Hello!" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/api/conversations").await;
    let conversations = response.body["conversations"].as_array().cloned().unwrap_or_default();
    assert_eq!(conversations.len(), 1);
    assert!(
        conversations[0]["id"]
            .as_str()
            .is_some_and(|id| id.starts_with("conv_"))
    );
}

#[tokio::test]
async fn test_send_message_validation() {
    let mut app = TestApp::new();
    app.login("sofia@artist.com").await;

    let empty = app
        .post_json("/api/messages", &json!({ "receiverId": "2", "content": "   " }))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.error(), Some("Message content is required"));

    let to_self = app
        .post_json("/api/messages", &json!({ "receiverId": "1", "content": "hi me" }))
        .await;
    assert_eq!(to_self.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .post_json("/api/messages", &json!({ "receiverId": "42", "content": "hello?" }))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.error(), Some("Recipient not found"));
}
