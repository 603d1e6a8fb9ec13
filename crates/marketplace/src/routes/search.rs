//! Search handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::search::SearchService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    pub partial_query: Option<String>,
}

/// Search the catalog. Never fails because of the AI service.
///
/// GET /api/search?query=
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Search query is required".to_string()))?;

    let results = SearchService::new(state.db(), state.grok())
        .search(&query)
        .await;

    tracing::debug!(results = results.len(), "Search completed");
    Ok(Json(json!({ "results": results, "query": query })))
}

/// Query suggestions for a partial query.
///
/// POST /api/search
#[instrument(skip(state, payload))]
pub async fn suggestions(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SuggestionsRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) = payload?;
    let partial_query = body
        .partial_query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Partial query is required".to_string()))?;

    let suggestions = SearchService::new(state.db(), state.grok())
        .suggestions(&partial_query)
        .await;

    Ok(Json(json!({ "suggestions": suggestions })))
}
