//! Artwork catalog and recommendation handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use artconnect_core::{ArtistId, ArtworkId};

use crate::db::artists::ArtistRepository;
use crate::db::artworks::ArtworkRepository;
use crate::error::{AppError, Result};
use crate::models::ArtworkFilter;
use crate::services::search::{SearchService, clamp_count};
use crate::state::AppState;

/// Query parameters for the catalog listing. All optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworksQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub artist_id: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Comma separated.
    pub tags: Option<String>,
}

/// Empty parameters count as absent.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_param<T: FromStr>(name: &str, value: Option<&String>) -> Result<Option<T>> {
    non_empty(value)
        .map(|v| {
            v.parse()
                .map_err(|_| AppError::BadRequest(format!("Invalid {name}: {v}")))
        })
        .transpose()
}

impl TryFrom<ArtworksQuery> for ArtworkFilter {
    type Error = AppError;

    fn try_from(query: ArtworksQuery) -> Result<Self> {
        Ok(Self {
            search: non_empty(query.search.as_ref()).map(String::from),
            category: parse_param("category", query.category.as_ref())?,
            kind: parse_param("type", query.kind.as_ref())?,
            status: parse_param("status", query.status.as_ref())?,
            artist_id: non_empty(query.artist_id.as_ref()).map(ArtistId::new),
            location: non_empty(query.location.as_ref()).map(String::from),
            min_price: parse_param::<Decimal>("minPrice", query.min_price.as_ref())?,
            max_price: parse_param::<Decimal>("maxPrice", query.max_price.as_ref())?,
            tags: query
                .tags
                .as_deref()
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

/// List artworks matching the query filters.
///
/// GET /api/artworks
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ArtworksQuery>,
) -> Result<Json<Value>> {
    let filter = ArtworkFilter::try_from(query)?;
    let artworks = ArtworkRepository::new(state.db()).list(&filter).await;
    Ok(Json(json!({ "artworks": artworks })))
}

/// An artwork with its artist.
///
/// GET /api/artworks/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let artwork = ArtworkRepository::new(state.db())
        .get_by_id(&ArtworkId::new(id))
        .await
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))?;

    let artist = ArtistRepository::new(state.db())
        .get_by_id(&artwork.artist_id)
        .await;

    Ok(Json(json!({ "artwork": artwork, "artist": artist })))
}

/// Every artwork by one artist.
///
/// GET /api/artists/{id}/artworks
#[instrument(skip(state))]
pub async fn by_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let artworks = ArtworkRepository::new(state.db())
        .by_artist(&ArtistId::new(id))
        .await;
    Ok(Json(json!({ "artworks": artworks })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsQuery {
    pub artwork_id: Option<String>,
    pub count: Option<String>,
}

/// Artworks similar to a reference artwork.
///
/// GET /api/recommendations?artworkId=&count=4
#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<Value>> {
    let artwork_id = non_empty(query.artwork_id.as_ref())
        .map(ArtworkId::new)
        .ok_or_else(|| AppError::BadRequest("Artwork ID is required".to_string()))?;

    // Unparseable counts fall back to the default.
    let count = clamp_count(non_empty(query.count.as_ref()).and_then(|c| c.parse().ok()));

    let reference = ArtworkRepository::new(state.db())
        .get_by_id(&artwork_id)
        .await
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))?;

    let similar = SearchService::new(state.db(), state.grok())
        .similar_artworks(&reference, count)
        .await;

    Ok(Json(json!({
        "similarArtworks": similar,
        "referenceArtworkId": reference.id,
    })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artconnect_core::{ArtworkCategory, ArtworkType};

    use super::*;

    #[test]
    fn test_query_to_filter() {
        let query = ArtworksQuery {
            category: Some("traditional-chinese".to_string()),
            kind: Some("physical".to_string()),
            min_price: Some("1000".to_string()),
            tags: Some("ink, landscape,,".to_string()),
            search: Some("  ".to_string()),
            ..ArtworksQuery::default()
        };

        let filter = ArtworkFilter::try_from(query).unwrap();
        assert_eq!(filter.category, Some(ArtworkCategory::TraditionalChinese));
        assert_eq!(filter.kind, Some(ArtworkType::Physical));
        assert_eq!(filter.min_price, Some(Decimal::from(1000)));
        assert_eq!(filter.tags, vec!["ink", "landscape"]);
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_invalid_filter_values_are_rejected() {
        let query = ArtworksQuery {
            max_price: Some("cheap".to_string()),
            ..ArtworksQuery::default()
        };
        let err = ArtworkFilter::try_from(query).unwrap_err();
        assert_eq!(err.message(), "Invalid maxPrice: cheap");

        let query = ArtworksQuery {
            status: Some("on-hold".to_string()),
            ..ArtworksQuery::default()
        };
        assert!(ArtworkFilter::try_from(query).is_err());
    }
}
