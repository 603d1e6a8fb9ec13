//! AI proxy handlers: pricing, critique, enhancement chat and matchmaking.
//!
//! Each handler validates its body, forwards to the Grok client and relays a
//! user-facing message when the upstream call fails.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::grok::GrokError;
use crate::services::feedback::{self, ChatReply, ChatTurn, EncodedImage, ImageError};
use crate::services::matchmaking::{self, MatchmakingError};
use crate::services::pricing::{self, ArtworkDetails, PriceSuggestion};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub image_url: Option<String>,
    #[serde(default)]
    pub artwork_details: ArtworkDetails,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    pub original_image: Option<String>,
    pub enhanced_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchmakingRequest {
    pub preferences: Option<Value>,
}

/// Suggest a price range for an artwork.
///
/// POST /api/grok-pricing
#[instrument(skip_all)]
pub async fn grok_pricing(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PricingRequest>, JsonRejection>,
) -> Result<Json<PriceSuggestion>> {
    let Json(body) = payload?;
    let image_url = body
        .image_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Image URL is required".to_string()))?;

    let grok = state.require_grok()?;
    let suggestion = pricing::suggest_price(grok, &image_url, &body.artwork_details)
        .await
        .map_err(|e| AppError::upstream("Failed to get price suggestion", e))?;

    Ok(Json(suggestion))
}

/// Markdown feedback on an artwork image.
///
/// POST /api/analyze
#[instrument(skip_all)]
pub async fn analyze(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) = payload?;
    let image = EncodedImage::parse(&body.image).map_err(|e| {
        AppError::BadRequest(
            match e {
                ImageError::Missing => "Image is required",
                ImageError::NotBase64 => "Image must be base64 encoded",
            }
            .to_string(),
        )
    })?;

    let grok = state.require_grok()?;
    let feedback = feedback::analyze_artwork(grok, &image)
        .await
        .map_err(|e| AppError::upstream("Failed to analyze artwork", e))?;

    Ok(Json(json!({ "feedback": feedback })))
}

/// Continue the enhancement conversation.
///
/// POST /api/ai/chat
#[instrument(skip_all)]
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>> {
    let Json(body) = payload?;
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

    if body.messages.is_empty() || !present(&body.original_image) {
        return Err(missing_chat_fields());
    }
    let enhanced_image = body
        .enhanced_image
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(missing_chat_fields)?;

    let grok = state.require_grok()?;
    let reply = feedback::enhancement_chat(grok, &body.messages, &enhanced_image)
        .await
        .map_err(|e| AppError::upstream("Failed to process chat message", e))?;

    Ok(Json(reply))
}

fn missing_chat_fields() -> AppError {
    AppError::BadRequest(
        "Messages, original image, and enhanced image are required".to_string(),
    )
}

/// Artists that fit a buyer's preferences.
///
/// POST /api/matchmaking
#[instrument(skip_all)]
pub async fn matchmaking(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MatchmakingRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) = payload?;
    let preferences = preferences_text(body.preferences)
        .ok_or_else(|| AppError::BadRequest("Preferences are required".to_string()))?;

    let grok = state.require_grok()?;
    let artists = matchmaking::match_artists(grok, &preferences)
        .await
        .map_err(|e| match e {
            MatchmakingError::Upstream(GrokError::Timeout) => {
                AppError::GatewayTimeout("Request timed out. Please try again.".to_string())
            }
            MatchmakingError::Parse(_) => {
                AppError::upstream("Failed to parse artist recommendations", e)
            }
            MatchmakingError::Upstream(_) => AppError::upstream("Failed to call AI service", e),
        })?;

    Ok(Json(json!({ "artists": artists })))
}

/// Preferences arrive as free text or as a structured object; objects are
/// forwarded as their JSON text.
fn preferences_text(preferences: Option<Value>) -> Option<String> {
    match preferences? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text),
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}
