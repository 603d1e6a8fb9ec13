//! Artwork listings and catalog filters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use artconnect_core::{
    ArtistId, ArtworkCategory, ArtworkId, ArtworkStatus, ArtworkType, CurrencyCode,
};

/// An artwork listed on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    pub description: String,
    pub artist_id: ArtistId,
    pub images: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ArtworkType,
    pub category: ArtworkCategory,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyCode>,
    pub status: ArtworkStatus,
    pub created_at: DateTime<Utc>,
    pub location: String,
    pub views: u32,
    pub likes: u32,
    /// Year of creation, recorded for uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Free-text medium, recorded for uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
}

impl Artwork {
    /// First image, used as the cart thumbnail.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether any tag is shared with `other`.
    #[must_use]
    pub fn shares_tag_with(&self, other: &Self) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }

    /// Lowercased title, description, category and tags joined by spaces.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let mut parts = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ];
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

/// Physical size of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    pub unit: DimensionUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    Cm,
    In,
}

/// Catalog filter. Every set field must match.
#[derive(Debug, Clone, Default)]
pub struct ArtworkFilter {
    /// Case-insensitive substring of title, description or tags.
    pub search: Option<String>,
    pub category: Option<ArtworkCategory>,
    pub kind: Option<ArtworkType>,
    pub status: Option<ArtworkStatus>,
    pub artist_id: Option<ArtistId>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Artwork must carry at least one of these tags.
    pub tags: Vec<String>,
}

impl ArtworkFilter {
    #[must_use]
    pub fn matches(&self, artwork: &Artwork) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = artwork.title.to_lowercase().contains(&needle)
                || artwork.description.to_lowercase().contains(&needle)
                || artwork
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if self.category.is_some_and(|c| c != artwork.category)
            || self.kind.is_some_and(|k| k != artwork.kind)
            || self.status.is_some_and(|s| s != artwork.status)
        {
            return false;
        }

        if self
            .artist_id
            .as_ref()
            .is_some_and(|id| id != &artwork.artist_id)
        {
            return false;
        }

        if let Some(location) = &self.location
            && !artwork
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
        {
            return false;
        }

        // Unpriced artworks never satisfy a price bound.
        if self.min_price.is_some() || self.max_price.is_some() {
            let Some(price) = artwork.price else {
                return false;
            };
            if self.min_price.is_some_and(|min| price < min)
                || self.max_price.is_some_and(|max| price > max)
            {
                return false;
            }
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|tag| artwork.has_tag(tag)) {
            return false;
        }

        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn artwork() -> Artwork {
        Artwork {
            id: ArtworkId::new("2"),
            title: "Digital Kowloon".to_string(),
            description: "Neon streets of Kowloon".to_string(),
            artist_id: ArtistId::new("2"),
            images: vec!["/artworks/artwork2.jpg".to_string()],
            kind: ArtworkType::Digital,
            category: ArtworkCategory::Digital,
            tags: vec!["cyberpunk".to_string(), "neon".to_string()],
            dimensions: None,
            price: Some(Decimal::from(800)),
            currency: Some(CurrencyCode::HKD),
            status: ArtworkStatus::Available,
            created_at: "2023-10-22T09:15:00Z".parse().unwrap(),
            location: "Kowloon, Hong Kong".to_string(),
            views: 189,
            likes: 63,
            year: None,
            medium: None,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(ArtworkFilter::default().matches(&artwork()));
    }

    #[test]
    fn test_filter_by_price_bounds() {
        let filter = ArtworkFilter {
            min_price: Some(Decimal::from(500)),
            max_price: Some(Decimal::from(1000)),
            ..ArtworkFilter::default()
        };
        assert!(filter.matches(&artwork()));

        let filter = ArtworkFilter {
            min_price: Some(Decimal::from(900)),
            ..ArtworkFilter::default()
        };
        assert!(!filter.matches(&artwork()));
    }

    #[test]
    fn test_filter_by_search_and_tags() {
        let filter = ArtworkFilter {
            search: Some("KOWLOON".to_string()),
            tags: vec!["neon".to_string(), "ink".to_string()],
            ..ArtworkFilter::default()
        };
        assert!(filter.matches(&artwork()));

        let filter = ArtworkFilter {
            tags: vec!["ink".to_string()],
            ..ArtworkFilter::default()
        };
        assert!(!filter.matches(&artwork()));
    }

    #[test]
    fn test_filter_by_location_and_category() {
        let filter = ArtworkFilter {
            location: Some("kowloon".to_string()),
            category: Some(ArtworkCategory::Digital),
            ..ArtworkFilter::default()
        };
        assert!(filter.matches(&artwork()));

        let filter = ArtworkFilter {
            category: Some(ArtworkCategory::Painting),
            ..ArtworkFilter::default()
        };
        assert!(!filter.matches(&artwork()));
    }

    #[test]
    fn test_serializes_type_and_numeric_price() {
        let json = serde_json::to_value(artwork()).unwrap();
        assert_eq!(json["type"], "digital");
        assert_eq!(json["artistId"], "2");
        assert!(json["price"].is_number());
        assert!(json.get("dimensions").is_none());
    }
}
