//! Messaging handlers. Every route requires a logged-in user.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use artconnect_core::{ConversationId, UserId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::services::messaging::MessagingService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// The session user's conversations, newest activity first.
///
/// GET /api/conversations
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn conversations(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Json<Value> {
    let conversations = MessagingService::new(state.db())
        .conversations(&user.id)
        .await;
    Json(json!({ "conversations": conversations }))
}

/// Messages of one conversation, oldest first.
///
/// GET /api/conversations/{id}/messages
#[instrument(skip_all, fields(user_id = %user.id, conversation_id = %id))]
pub async fn conversation_messages(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let (conversation, messages) = MessagingService::new(state.db())
        .conversation_messages(&ConversationId::new(id), &user.id)
        .await?;
    Ok(Json(json!({ "conversation": conversation, "messages": messages })))
}

/// Mark the messages addressed to the session user as read.
///
/// POST /api/conversations/{id}/read
#[instrument(skip_all, fields(user_id = %user.id, conversation_id = %id))]
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let updated = MessagingService::new(state.db())
        .mark_as_read(&ConversationId::new(id), &user.id)
        .await?;
    Ok(Json(json!({ "updated": updated })))
}

/// Send a message from the session user.
///
/// POST /api/messages
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn send(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    payload: std::result::Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) = payload?;
    let receiver = body
        .receiver_id
        .filter(|id| !id.trim().is_empty())
        .map(|id| UserId::new(id.trim()))
        .ok_or_else(|| AppError::BadRequest("Receiver ID is required".to_string()))?;

    let message = MessagingService::new(state.db())
        .send(&user.id, &receiver, &body.content)
        .await?;

    Ok(Json(json!({ "message": message })))
}
