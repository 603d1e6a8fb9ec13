//! Role and status enums for users and artworks.

use serde::{Deserialize, Serialize};

/// Account role distinguishing dashboard and permission views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Creates and lists artworks.
    Artist,
    /// Browses, saves and buys artworks.
    Buyer,
    /// Platform administrator.
    Admin,
}

impl UserRole {
    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Buyer => "buyer",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(Self::Artist),
            "buyer" => Ok(Self::Buyer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Sale status of an artwork.
///
/// Nothing in the marketplace transitions an artwork to `Sold`; the status
/// only comes from seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ArtworkStatus {
    #[default]
    Available,
    Sold,
    NotForSale,
}

impl ArtworkStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::NotForSale => "not-for-sale",
        }
    }
}

impl std::str::FromStr for ArtworkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "sold" => Ok(Self::Sold),
            "not-for-sale" => Ok(Self::NotForSale),
            _ => Err(format!("invalid artwork status: {s}")),
        }
    }
}

/// Whether an artwork is a physical object or a digital file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkType {
    #[default]
    Physical,
    Digital,
}

impl std::str::FromStr for ArtworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical" => Ok(Self::Physical),
            "digital" => Ok(Self::Digital),
            _ => Err(format!("invalid artwork type: {s}")),
        }
    }
}

/// Artwork category used for browsing and similarity matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ArtworkCategory {
    Painting,
    Drawing,
    Sculpture,
    Photography,
    Digital,
    MixedMedia,
    Illustration,
    TraditionalChinese,
    Calligraphy,
    #[default]
    Other,
}

impl ArtworkCategory {
    /// Wire representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Painting => "painting",
            Self::Drawing => "drawing",
            Self::Sculpture => "sculpture",
            Self::Photography => "photography",
            Self::Digital => "digital",
            Self::MixedMedia => "mixed-media",
            Self::Illustration => "illustration",
            Self::TraditionalChinese => "traditional-chinese",
            Self::Calligraphy => "calligraphy",
            Self::Other => "other",
        }
    }

    /// Best-effort category for a free-text medium such as "Oil on canvas".
    #[must_use]
    pub fn from_medium(medium: &str) -> Self {
        let medium = medium.to_lowercase();
        if medium.contains("digital") {
            Self::Digital
        } else if medium.contains("oil") || medium.contains("acrylic") || medium.contains("paint")
        {
            Self::Painting
        } else if medium.contains("sculpt") || medium.contains("3d") {
            Self::Sculpture
        } else if medium.contains("mixed") {
            Self::MixedMedia
        } else if medium.contains("photo") {
            Self::Photography
        } else if medium.contains("draw") || medium.contains("pencil") || medium.contains("charcoal")
        {
            Self::Drawing
        } else if medium.contains("callig") {
            Self::Calligraphy
        } else if medium.contains("illustrat") {
            Self::Illustration
        } else if medium.contains("ink") {
            Self::TraditionalChinese
        } else {
            Self::Other
        }
    }
}

impl std::fmt::Display for ArtworkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArtworkCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "painting" => Ok(Self::Painting),
            "drawing" => Ok(Self::Drawing),
            "sculpture" => Ok(Self::Sculpture),
            "photography" => Ok(Self::Photography),
            "digital" => Ok(Self::Digital),
            "mixed-media" => Ok(Self::MixedMedia),
            "illustration" => Ok(Self::Illustration),
            "traditional-chinese" => Ok(Self::TraditionalChinese),
            "calligraphy" => Ok(Self::Calligraphy),
            "other" => Ok(Self::Other),
            _ => Err(format!("invalid artwork category: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_round_trips_through_str() {
        for role in [UserRole::Artist, UserRole::Buyer, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("collector".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_artwork_status_wire_format() {
        let json = serde_json::to_string(&ArtworkStatus::NotForSale).unwrap();
        assert_eq!(json, "\"not-for-sale\"");
        assert_eq!(
            "not-for-sale".parse::<ArtworkStatus>().unwrap(),
            ArtworkStatus::NotForSale
        );
    }

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&ArtworkCategory::TraditionalChinese).unwrap();
        assert_eq!(json, "\"traditional-chinese\"");
        assert_eq!(
            "mixed-media".parse::<ArtworkCategory>().unwrap(),
            ArtworkCategory::MixedMedia
        );
    }

    #[test]
    fn test_category_from_medium() {
        assert_eq!(
            ArtworkCategory::from_medium("Digital (Procreate)"),
            ArtworkCategory::Digital
        );
        assert_eq!(
            ArtworkCategory::from_medium("Oil on canvas"),
            ArtworkCategory::Painting
        );
        assert_eq!(
            ArtworkCategory::from_medium("Charcoal"),
            ArtworkCategory::Drawing
        );
        assert_eq!(
            ArtworkCategory::from_medium("Found objects"),
            ArtworkCategory::Other
        );
    }
}
