//! Catalog search, query suggestions and similar-artwork recommendations.
//!
//! Search runs in three stages: a keyword router for the common art terms,
//! an LLM ranking of the whole catalog, and a plain keyword match. The LLM
//! stage is optional and never fails a search; any error falls through to
//! the keyword match.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::db::Database;
use crate::db::artworks::ArtworkRepository;
use crate::grok::{ChatMessage, ChatOptions, GrokClient, GrokError};
use crate::models::Artwork;

/// Default number of similar artworks.
pub const DEFAULT_SIMILAR_COUNT: usize = 4;
/// Upper bound on requested similar artworks.
pub const MAX_SIMILAR_COUNT: usize = 20;
const MAX_SUGGESTIONS: usize = 5;

const SEARCH_SYSTEM_PROMPT: &str = "You are an art expert assistant that helps match user queries \
    with relevant artworks. Your task is to analyze the user's query and return the IDs of \
    artworks that best match their interests, ranked by relevance.";

const SUGGESTIONS_SYSTEM_PROMPT: &str = "You are an art search assistant that helps users \
    discover artwork by suggesting relevant search terms.";

/// A family of queries answered by filtering on one term.
struct KeywordRoute {
    triggers: &'static [&'static str],
    /// Matched against category, description and title.
    term: &'static str,
    /// Matched against tags.
    tag_terms: &'static [&'static str],
}

const KEYWORD_ROUTES: &[KeywordRoute] = &[
    KeywordRoute {
        triggers: &["traditional", "painting", "chinese", "landscape"],
        term: "traditional",
        tag_terms: &["traditional"],
    },
    KeywordRoute {
        triggers: &["digital", "modern", "contemporary"],
        term: "digital",
        tag_terms: &["digital", "modern"],
    },
    KeywordRoute {
        triggers: &["photography", "photo", "photograph"],
        term: "photo",
        tag_terms: &["photo"],
    },
];

impl KeywordRoute {
    fn find(query: &str) -> Option<&'static Self> {
        KEYWORD_ROUTES
            .iter()
            .find(|route| route.triggers.iter().any(|t| query.contains(t)))
    }

    fn matches(&self, artwork: &Artwork) -> bool {
        artwork.category.as_str().contains(self.term)
            || artwork.tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                self.tag_terms.iter().any(|t| tag.contains(t))
            })
            || artwork.description.to_lowercase().contains(self.term)
            || artwork.title.to_lowercase().contains(self.term)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedIds {
    #[serde(default)]
    artwork_ids: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Suggestions {
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Search service over the artwork catalog.
pub struct SearchService<'a> {
    artworks: ArtworkRepository<'a>,
    grok: Option<&'a GrokClient>,
}

impl<'a> SearchService<'a> {
    #[must_use]
    pub const fn new(db: &'a Database, grok: Option<&'a GrokClient>) -> Self {
        Self {
            artworks: ArtworkRepository::new(db),
            grok,
        }
    }

    /// Artworks relevant to `query`, most relevant first.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<Artwork> {
        let catalog = self.artworks.all().await;
        let lower = query.to_lowercase();

        if let Some(route) = KeywordRoute::find(&lower) {
            tracing::debug!(term = route.term, "Keyword-routed search");
            return catalog.into_iter().filter(|a| route.matches(a)).collect();
        }

        if let Some(grok) = self.grok {
            match rank_with_llm(grok, query, &catalog).await {
                Ok(ranked) if !ranked.is_empty() => return ranked,
                Ok(_) => tracing::debug!("LLM ranking returned no known artworks"),
                Err(e) => tracing::warn!(error = %e, "LLM search failed, using keyword match"),
            }
        }

        keyword_match(&lower, catalog)
    }

    /// Up to five completed queries for a partial one. Empty when no LLM is
    /// configured or the LLM call fails.
    #[instrument(skip(self))]
    pub async fn suggestions(&self, partial_query: &str) -> Vec<String> {
        let Some(grok) = self.grok else {
            return Vec::new();
        };

        let messages = [
            ChatMessage::system(SUGGESTIONS_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Based on my partial search query \"{partial_query}\", suggest 5 complete search \
                 queries that would help me find interesting artwork. Return only a JSON object \
                 with a key 'suggestions' containing an array of strings."
            )),
        ];

        let parsed = grok
            .chat(&messages, ChatOptions::json())
            .await
            .and_then(|content| {
                serde_json::from_str::<Suggestions>(&content)
                    .map_err(|e| GrokError::Parse(e.to_string()))
            });

        match parsed {
            Ok(Suggestions { mut suggestions }) => {
                suggestions.truncate(MAX_SUGGESTIONS);
                suggestions
            }
            Err(e) => {
                tracing::warn!(error = %e, "Search suggestions failed");
                Vec::new()
            }
        }
    }

    /// Artworks similar to `reference`: same category first, then shared
    /// tags, topped up by popularity.
    pub async fn similar_artworks(&self, reference: &Artwork, count: usize) -> Vec<Artwork> {
        similar_from(reference, self.artworks.all().await, count)
    }
}

/// Clamp a requested similar-artwork count to `1..=20`.
#[must_use]
pub fn clamp_count(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_SIMILAR_COUNT,
        Some(n) if n < 1 => 1,
        Some(n) => usize::try_from(n).map_or(MAX_SIMILAR_COUNT, |n| n.min(MAX_SIMILAR_COUNT)),
    }
}

async fn rank_with_llm(
    grok: &GrokClient,
    query: &str,
    catalog: &[Artwork],
) -> Result<Vec<Artwork>, GrokError> {
    let summary: Vec<_> = catalog
        .iter()
        .map(|a| {
            json!({
                "id": a.id,
                "title": a.title,
                "description": a.description,
                "category": a.category,
                "tags": a.tags,
                "type": a.kind,
            })
        })
        .collect();

    let messages = [
        ChatMessage::system(SEARCH_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "I'm looking for artwork that matches this description: \"{query}\". Here are the \
             available artworks: {}. Return only a JSON object with a key 'artworkIds' containing \
             an array of artwork IDs ranked by relevance to my query, with the most relevant first.",
            serde_json::Value::Array(summary)
        )),
    ];

    let content = grok.chat(&messages, ChatOptions::json()).await?;
    let ranked: RankedIds =
        serde_json::from_str(&content).map_err(|e| GrokError::Parse(e.to_string()))?;

    Ok(ranked
        .artwork_ids
        .iter()
        .filter_map(|value| match value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter_map(|id| catalog.iter().find(|a| a.id.as_str() == id).cloned())
        .collect())
}

/// Artworks whose searchable text contains any query word longer than two
/// characters.
fn keyword_match(lower_query: &str, catalog: Vec<Artwork>) -> Vec<Artwork> {
    let keywords: Vec<&str> = lower_query
        .split_whitespace()
        .filter(|k| k.chars().count() > 2)
        .collect();

    catalog
        .into_iter()
        .filter(|artwork| {
            let text = artwork.searchable_text();
            keywords.iter().any(|k| text.contains(k))
        })
        .collect()
}

fn similar_from(reference: &Artwork, catalog: Vec<Artwork>, count: usize) -> Vec<Artwork> {
    let others: Vec<Artwork> = catalog
        .into_iter()
        .filter(|a| a.id != reference.id)
        .collect();

    let mut picked: Vec<Artwork> = others
        .iter()
        .filter(|a| a.category == reference.category)
        .cloned()
        .collect();
    for artwork in others.iter().filter(|a| a.shares_tag_with(reference)) {
        if !picked.iter().any(|p| p.id == artwork.id) {
            picked.push(artwork.clone());
        }
    }

    if picked.len() >= count {
        picked.truncate(count);
        return picked;
    }

    let mut rest: Vec<Artwork> = others
        .into_iter()
        .filter(|a| !picked.iter().any(|p| p.id == a.id))
        .collect();
    rest.sort_by(|a, b| b.likes.cmp(&a.likes).then(b.views.cmp(&a.views)));

    let missing = count - picked.len();
    picked.extend(rest.into_iter().take(missing));
    picked
}
