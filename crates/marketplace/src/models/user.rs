//! User domain types.
//!
//! [`User`] is the stored record and is deliberately not `Serialize`: the
//! plaintext password must never reach a client. Everything that leaves the
//! process goes through [`PublicUser`].

use serde::{Deserialize, Serialize};

use artconnect_core::{Email, UserId, UserRole};

/// A marketplace account (stored record).
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// Plaintext password. Mock store only.
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub profile: UserProfile,
}

/// Optional profile attributes shown on artist and buyer pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub primary_medium: Option<String>,
    /// Free-text, comma separated.
    pub skills: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// A link to one of the user's profiles elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
        }
    }
}

/// A user as returned by the API, without the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub user_type: UserRole,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            user_type: user.role,
            profile: user.profile.clone(),
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_has_no_password() {
        let user = User {
            id: UserId::new("1"),
            email: Email::parse("sofia@artist.com").unwrap(),
            password: "password123".to_string(),
            name: "Sofia Rodriguez".to_string(),
            role: UserRole::Artist,
            profile: UserProfile {
                location: Some("Barcelona, Spain".to_string()),
                social_links: vec![SocialLink::new("website", "https://sofiaart.com")],
                ..UserProfile::default()
            },
        };

        let json = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["userType"], "artist");
        assert_eq!(json["location"], "Barcelona, Spain");
        assert_eq!(json["socialLinks"][0]["platform"], "website");
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("password123"));
    }
}
