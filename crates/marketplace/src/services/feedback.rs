//! Artwork critique and enhancement chat.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::grok::{ChatMessage, ChatOptions, ContentPart, GrokClient, GrokError};

const NO_FEEDBACK: &str = "No feedback available";

const ANALYZE_PROMPT: &str = "Analyze this artwork and provide concise, actionable feedback. \
Keep your response under 300 words total. Format your response using this exact markdown \
structure with proper spacing:\n\n\
## ✨ Strengths\n\n\
- **First strength**: Brief explanation\n\
- **Second strength**: Brief explanation\n\
- **Third strength**: Brief explanation\n\n\
&nbsp;\n\n\
## 🔍 Areas for Growth\n\n\
- **First suggestion**: Specific, actionable advice\n\
- **Second suggestion**: Specific, actionable advice\n\
- **Third suggestion**: Specific, actionable advice\n\n\
&nbsp;\n\n\
## 💭 Reflection\n\n\
One thought-provoking question to help the artist develop their vision further\n\n\
&nbsp;\n\n\
DO NOT describe or summarize what the artwork depicts. Focus only on providing feedback about \
technique, composition, color, emotion, etc. Be specific, encouraging, and focused on helping \
the artist take their next steps.";

const ADVISOR_PROMPT: &str = "You are an expert art advisor helping an artist improve their work. \
You have access to their original artwork and an enhanced version you previously created. \
Provide specific, actionable advice based on their questions. If they ask for further \
enhancements, describe exactly what changes would be made.";

/// Words in a reply that mean the enhanced image is still relevant.
const ENHANCEMENT_WORDS: [&str; 3] = ["enhance", "adjust", "change"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("image is required")]
    Missing,

    #[error("image must be base64 encoded")]
    NotBase64,
}

/// A validated image ready to send as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime: String,
    data: String,
}

impl EncodedImage {
    /// Accepts raw base64 or a `data:<mime>;base64,` URL.
    ///
    /// Whitespace is dropped and missing `=` padding restored before the
    /// payload is checked. Raw base64 is assumed to be JPEG.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Missing` for an empty input and
    /// `ImageError::NotBase64` if the payload does not decode.
    pub fn parse(input: &str) -> Result<Self, ImageError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ImageError::Missing);
        }

        let (mime, payload) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',').ok_or(ImageError::NotBase64)?;
                let mime = header
                    .strip_suffix(";base64")
                    .ok_or(ImageError::NotBase64)?;
                (mime.to_string(), payload)
            }
            None => ("image/jpeg".to_string(), input),
        };

        let mut data: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if data.is_empty() {
            return Err(ImageError::Missing);
        }
        while data.len() % 4 != 0 {
            data.push('=');
        }

        STANDARD.decode(&data).map_err(|_| ImageError::NotBase64)?;

        Ok(Self { mime, data })
    }

    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data)
    }
}

/// Markdown critique of an artwork image.
///
/// # Errors
///
/// Returns an error if the upstream call fails.
#[instrument(skip_all)]
pub async fn analyze_artwork(grok: &GrokClient, image: &EncodedImage) -> Result<String, GrokError> {
    let messages = [ChatMessage::user_parts(vec![
        ContentPart::image(image.data_url()),
        ContentPart::text(ANALYZE_PROMPT),
    ])];

    match grok.chat(&messages, ChatOptions::default()).await {
        Ok(feedback) => Ok(feedback),
        Err(GrokError::EmptyResponse) => Ok(NO_FEEDBACK.to_string()),
        Err(e) => Err(e),
    }
}

/// One turn of the enhancement chat as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl From<&ChatTurn> for ChatMessage {
    fn from(turn: &ChatTurn) -> Self {
        if turn.role.eq_ignore_ascii_case("assistant") {
            Self::assistant(turn.content.clone())
        } else {
            Self::user(turn.content.clone())
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_enhanced_image: Option<String>,
}

/// Answer the artist's latest question about their enhanced artwork.
///
/// # Errors
///
/// Returns an error if the upstream call fails or the reply is empty.
#[instrument(skip_all, fields(turns = history.len()))]
pub async fn enhancement_chat(
    grok: &GrokClient,
    history: &[ChatTurn],
    enhanced_image: &str,
) -> Result<ChatReply, GrokError> {
    let messages: Vec<ChatMessage> = std::iter::once(ChatMessage::system(ADVISOR_PROMPT))
        .chain(history.iter().map(ChatMessage::from))
        .collect();

    let reply = grok.chat(&messages, ChatOptions::new(0.7, 300)).await?;
    Ok(chat_reply(reply, enhanced_image))
}

fn chat_reply(reply: String, enhanced_image: &str) -> ChatReply {
    let lower = reply.to_lowercase();
    let mentions_enhancement = ENHANCEMENT_WORDS.iter().any(|w| lower.contains(w));

    ChatReply {
        new_enhanced_image: mentions_enhancement.then(|| enhanced_image.to_string()),
        reply,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_base64_gets_padding_and_jpeg_mime() {
        let image = EncodedImage::parse("aGVsbG8").unwrap();
        assert_eq!(image.data_url(), "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn test_data_url_keeps_mime() {
        let image = EncodedImage::parse("data:image/png;base64,aGVs\nbG8=").unwrap();
        assert_eq!(image.data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_invalid_images() {
        assert_eq!(EncodedImage::parse("  "), Err(ImageError::Missing));
        assert_eq!(EncodedImage::parse("not base64!"), Err(ImageError::NotBase64));
        assert_eq!(
            EncodedImage::parse("data:image/png,plain"),
            Err(ImageError::NotBase64)
        );
    }

    #[test]
    fn test_chat_reply_echoes_image_when_enhancing() {
        let reply = chat_reply("I would adjust the contrast.".to_string(), "img-b64");
        assert_eq!(reply.new_enhanced_image.as_deref(), Some("img-b64"));

        let reply = chat_reply("The composition is balanced.".to_string(), "img-b64");
        assert!(reply.new_enhanced_image.is_none());
        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("newEnhancedImage").is_none());
    }

    #[test]
    fn test_history_roles_map_to_chat_roles() {
        let turn = ChatTurn {
            role: "assistant".to_string(),
            content: "Hi".to_string(),
        };
        let message = ChatMessage::from(&turn);
        assert_eq!(message.role, crate::grok::Role::Assistant);
    }
}
