//! Artist matchmaking: the model invents five artist profiles that fit a
//! buyer's stated preferences.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::grok::{ChatMessage, ChatOptions, GrokClient, GrokError};

const SYSTEM_PROMPT: &str = r#"Generate 5 artist profiles as a JSON array. Each with id, name, compatibilityScore (0-100), location, bio (short), specialty. Format: [{"id":"a1","name":"Name","compatibilityScore":85,"location":"City","bio":"Bio","specialty":"Specialty"}]"#;

static JSON_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n([\s\S]*?)\n```").expect("Invalid regex"));
static FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([\s\S]*?)```").expect("Invalid regex"));
static TRAILING_COMMA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([\]}])").expect("Invalid regex"));
static BARE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([{,]\s*)([a-zA-Z0-9_]+)(\s*:)").expect("Invalid regex"));

/// An artist suggested for the buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedArtist {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub compatibility_score: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub specialty: String,
}

fn string_or_number<'de, D: serde::Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {other}"))),
    }
}

#[derive(Debug, Error)]
pub enum MatchmakingError {
    #[error(transparent)]
    Upstream(#[from] GrokError),

    #[error("unparseable artist recommendations: {0}")]
    Parse(String),
}

/// Ask the model for artists matching `preferences`.
///
/// # Errors
///
/// Returns `MatchmakingError::Upstream` if the call fails (including
/// timeouts) and `MatchmakingError::Parse` if no artist list can be
/// recovered from the reply.
#[instrument(skip_all, fields(preferences_len = preferences.len()))]
pub async fn match_artists(
    grok: &GrokClient,
    preferences: &str,
) -> Result<Vec<MatchedArtist>, MatchmakingError> {
    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(preferences),
    ];

    let content = grok.chat(&messages, ChatOptions::new(0.5, 1000)).await?;
    let artists = parse_artists(&content)?;
    tracing::info!(count = artists.len(), "Parsed artist recommendations");
    Ok(artists)
}

/// Recover the artist array from a reply, tolerating code fences, trailing
/// commas and unquoted keys.
fn parse_artists(content: &str) -> Result<Vec<MatchedArtist>, MatchmakingError> {
    let json = JSON_FENCE_REGEX
        .captures(content)
        .or_else(|| FENCE_REGEX.captures(content))
        .and_then(|c| c.get(1))
        .map_or(content, |m| m.as_str())
        .trim();

    let repaired = TRAILING_COMMA_REGEX.replace_all(json, "$1");

    serde_json::from_str(&repaired).or_else(|first_err| {
        let quoted = BARE_KEY_REGEX.replace_all(&repaired, r#"$1"$2"$3"#);
        serde_json::from_str(&quoted).map_err(|_| {
            tracing::warn!(error = %first_err, "Could not parse artist recommendations");
            MatchmakingError::Parse(first_err.to_string())
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ARTISTS: &str = r#"[{"id":"a1","name":"Ada Ng","compatibilityScore":91,"location":"Hong Kong","bio":"Ink painter","specialty":"Ink wash"},{"id":"a2","name":"Ben Ho","compatibilityScore":84,"location":"Macau","bio":"Sculptor","specialty":"Bronze"},]"#;

    #[test]
    fn test_parse_fenced_json_with_trailing_comma() {
        let content = format!("Here you go:\n```json\n{ARTISTS}\n```\nEnjoy!");
        let artists = parse_artists(&content).unwrap();
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].name, "Ada Ng");
        assert!((artists[1].compatibility_score - 84.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_bare_fence_and_numeric_id() {
        let content = "```[{\"id\":7,\"name\":\"Cy Lau\"}]```";
        let artists = parse_artists(content).unwrap();
        assert_eq!(artists[0].id, "7");
        assert_eq!(artists[0].specialty, "");
    }

    #[test]
    fn test_parse_unquoted_keys() {
        let content = r#"[{id: "a1", name: "Dee Wu", compatibilityScore: 77}]"#;
        let artists = parse_artists(content).unwrap();
        assert_eq!(artists[0].name, "Dee Wu");
    }

    #[test]
    fn test_parse_failure() {
        assert!(matches!(
            parse_artists("Sorry, I cannot help with that."),
            Err(MatchmakingError::Parse(_))
        ));
    }

    #[test]
    fn test_serializes_camel_case() {
        let artists = parse_artists(ARTISTS).unwrap();
        let json = serde_json::to_value(&artists[0]).unwrap();
        assert_eq!(json["compatibilityScore"], 91.0);
    }
}
