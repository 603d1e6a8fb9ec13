//! Demo data loaded into the store at start-up.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use artconnect_core::{
    ArtistId, ArtworkCategory, ArtworkId, ArtworkStatus, ArtworkType, ConversationId,
    CurrencyCode, Email, MessageId, UserId, UserRole,
};

use super::RepositoryError;
use crate::models::{
    Artist, ArtistSocialLinks, Artwork, Conversation, DimensionUnit, Dimensions, Message,
    SocialLink, User, UserProfile,
};

/// Password shared by every seeded account.
pub const DEMO_PASSWORD: &str = "password123";

fn email(value: &str) -> Result<Email, RepositoryError> {
    Email::parse(value)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid seed email {value}: {e}")))
}

fn timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid seed timestamp {value}: {e}"))
        })
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Two artists (Sofia, Maya) and one buyer (Alex).
pub fn users() -> Result<Vec<User>, RepositoryError> {
    Ok(vec![
        User {
            id: UserId::new("1"),
            email: email("sofia@artist.com")?,
            password: DEMO_PASSWORD.to_string(),
            name: "Sofia Rodriguez".to_string(),
            role: UserRole::Artist,
            profile: UserProfile {
                profile_image: Some("/placeholder-profile.jpg".to_string()),
                bio: Some(
                    "Contemporary visual artist specializing in mixed media and digital art. \
                     Drawing inspiration from urban landscapes and natural patterns to create \
                     vibrant, thought-provoking pieces that challenge perception."
                        .to_string(),
                ),
                location: Some("Barcelona, Spain".to_string()),
                experience: Some("8 years".to_string()),
                primary_medium: Some("Mixed Media, Digital Art".to_string()),
                skills: Some(
                    "Blender, VFX, 3D modelling, Oil Painting, Watercoloring".to_string(),
                ),
                social_links: vec![
                    SocialLink::new("instagram", "https://instagram.com/sofia.creates"),
                    SocialLink::new("twitter", "https://twitter.com/sofia_art"),
                    SocialLink::new("website", "https://sofiaart.com"),
                ],
            },
        },
        User {
            id: UserId::new("2"),
            email: email("alex@buyer.com")?,
            password: DEMO_PASSWORD.to_string(),
            name: "Alex Johnson".to_string(),
            role: UserRole::Buyer,
            profile: UserProfile {
                profile_image: Some("/placeholder-buyer.jpg".to_string()),
                bio: Some(
                    "Art enthusiast and collector with a passion for contemporary pieces."
                        .to_string(),
                ),
                location: Some("New York, USA".to_string()),
                ..UserProfile::default()
            },
        },
        User {
            id: UserId::new("3"),
            email: email("maya@artist.com")?,
            password: DEMO_PASSWORD.to_string(),
            name: "Maya Patel".to_string(),
            role: UserRole::Artist,
            profile: UserProfile {
                profile_image: Some("/placeholder-artist-2.jpg".to_string()),
                bio: Some(
                    "Digital artist creating surreal landscapes and character designs."
                        .to_string(),
                ),
                location: Some("London, UK".to_string()),
                experience: Some("5 years".to_string()),
                primary_medium: Some("Digital Art, Illustration".to_string()),
                skills: Some(
                    "Procreate, Photoshop, Concept Art, Character Design".to_string(),
                ),
                social_links: vec![
                    SocialLink::new("instagram", "https://instagram.com/maya.creates"),
                    SocialLink::new("website", "https://mayaart.com"),
                ],
            },
        },
    ])
}

fn artist(
    id: &str,
    name: &str,
    location: &str,
    bio: &str,
    social_links: ArtistSocialLinks,
) -> Artist {
    Artist {
        id: ArtistId::new(id),
        name: name.to_string(),
        location: location.to_string(),
        bio: bio.to_string(),
        profile_image: format!("/artists/artist{id}.jpg"),
        contact_info: None,
        social_links,
    }
}

/// Five Hong Kong artists.
pub fn artists() -> Vec<Artist> {
    vec![
        artist(
            "1",
            "Mei Lin",
            "Central, Hong Kong",
            "Contemporary artist specializing in traditional Chinese painting with modern influences.",
            ArtistSocialLinks {
                instagram: Some("@meilin_art".to_string()),
                website: Some("https://meilin-art.com".to_string()),
                ..ArtistSocialLinks::default()
            },
        ),
        artist(
            "2",
            "David Wong",
            "Kowloon, Hong Kong",
            "Digital artist exploring the intersection of technology and traditional Hong Kong culture.",
            ArtistSocialLinks {
                instagram: Some("@david_wong_digital".to_string()),
                twitter: Some("@davidwongart".to_string()),
                ..ArtistSocialLinks::default()
            },
        ),
        artist(
            "3",
            "Sarah Chen",
            "Wan Chai, Hong Kong",
            "Mixed media artist focusing on urban landscapes and city life in Hong Kong.",
            ArtistSocialLinks {
                instagram: Some("@sarahchen_art".to_string()),
                website: Some("https://sarahchenart.com".to_string()),
                ..ArtistSocialLinks::default()
            },
        ),
        artist(
            "4",
            "Michael Zhang",
            "Tsim Sha Tsui, Hong Kong",
            "Photographer capturing the contrast between Hong Kong's natural beauty and urban development.",
            ArtistSocialLinks {
                instagram: Some("@michael_zhang_photo".to_string()),
                ..ArtistSocialLinks::default()
            },
        ),
        artist(
            "5",
            "Lily Kwok",
            "Sai Kung, Hong Kong",
            "Calligraphy artist blending traditional techniques with contemporary aesthetics.",
            ArtistSocialLinks {
                instagram: Some("@lily_calligraphy".to_string()),
                website: Some("https://lilykwok.art".to_string()),
                ..ArtistSocialLinks::default()
            },
        ),
    ]
}

/// Literal fields for one seeded artwork.
struct ArtworkSeed<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    artist_id: &'a str,
    images: &'a [&'a str],
    kind: ArtworkType,
    category: ArtworkCategory,
    tags: &'a [&'a str],
    dimensions: Option<(u32, u32)>,
    price: i64,
    status: ArtworkStatus,
    created_at: &'a str,
    location: &'a str,
    views: u32,
    likes: u32,
}

impl ArtworkSeed<'_> {
    fn build(&self) -> Result<Artwork, RepositoryError> {
        Ok(Artwork {
            id: ArtworkId::new(self.id),
            title: self.title.to_string(),
            description: self.description.to_string(),
            artist_id: ArtistId::new(self.artist_id),
            images: strings(self.images),
            kind: self.kind,
            category: self.category,
            tags: strings(self.tags),
            dimensions: self.dimensions.map(|(width, height)| Dimensions {
                width,
                height,
                depth: None,
                unit: DimensionUnit::Cm,
            }),
            price: Some(Decimal::from(self.price)),
            currency: Some(CurrencyCode::HKD),
            status: self.status,
            created_at: timestamp(self.created_at)?,
            location: self.location.to_string(),
            views: self.views,
            likes: self.likes,
            year: None,
            medium: None,
        })
    }
}

/// Eight listed artworks, all priced in HKD.
#[allow(clippy::too_many_lines)]
pub fn artworks() -> Result<Vec<Artwork>, RepositoryError> {
    [
        ArtworkSeed {
            id: "1",
            title: "Victoria Harbor at Dusk",
            description: "A traditional Chinese painting depicting Victoria Harbor at dusk, showcasing the iconic Hong Kong skyline with traditional brushwork techniques.",
            artist_id: "1",
            images: &["/artworks/artwork1.jpg"],
            kind: ArtworkType::Physical,
            category: ArtworkCategory::TraditionalChinese,
            tags: &["landscape", "harbor", "skyline", "traditional"],
            dimensions: Some((60, 40)),
            price: 1200,
            status: ArtworkStatus::Available,
            created_at: "2023-09-15T14:30:00Z",
            location: "Central, Hong Kong",
            views: 245,
            likes: 87,
        },
        ArtworkSeed {
            id: "2",
            title: "Digital Kowloon",
            description: "A digital artwork reimagining the streets of Kowloon with futuristic neon elements while preserving traditional architectural features.",
            artist_id: "2",
            images: &["/artworks/artwork2.jpg"],
            kind: ArtworkType::Digital,
            category: ArtworkCategory::Digital,
            tags: &["cyberpunk", "neon", "urban", "futuristic"],
            dimensions: None,
            price: 800,
            status: ArtworkStatus::Available,
            created_at: "2023-10-22T09:15:00Z",
            location: "Kowloon, Hong Kong",
            views: 189,
            likes: 63,
        },
        ArtworkSeed {
            id: "3",
            title: "Fragments of Wan Chai",
            description: "A mixed media collage exploring the diverse textures and patterns found in Wan Chai's urban landscape.",
            artist_id: "3",
            images: &["/artworks/artwork3.jpg"],
            kind: ArtworkType::Physical,
            category: ArtworkCategory::MixedMedia,
            tags: &["collage", "urban", "texture", "city life"],
            dimensions: Some((50, 70)),
            price: 1500,
            status: ArtworkStatus::Available,
            created_at: "2023-11-05T16:45:00Z",
            location: "Wan Chai, Hong Kong",
            views: 132,
            likes: 41,
        },
        ArtworkSeed {
            id: "4",
            title: "Between Mountains and Skyscrapers",
            description: "A photographic series exploring the unique geography of Hong Kong, where mountains meet urban development.",
            artist_id: "4",
            images: &[
                "/artworks/artwork4.jpg",
                "/artworks/artwork4-2.jpg",
                "/artworks/artwork4-3.jpg",
            ],
            kind: ArtworkType::Physical,
            category: ArtworkCategory::Photography,
            tags: &["nature", "urban", "contrast", "landscape"],
            dimensions: Some((80, 60)),
            price: 2200,
            status: ArtworkStatus::Available,
            created_at: "2023-12-10T11:20:00Z",
            location: "Tsim Sha Tsui, Hong Kong",
            views: 276,
            likes: 94,
        },
        ArtworkSeed {
            id: "5",
            title: "Poetic Strokes",
            description: "A modern calligraphy piece featuring a traditional Chinese poem about Hong Kong's resilience and beauty.",
            artist_id: "5",
            images: &["/artworks/artwork5.jpg"],
            kind: ArtworkType::Physical,
            category: ArtworkCategory::Calligraphy,
            tags: &["poetry", "traditional", "chinese", "characters"],
            dimensions: Some((45, 90)),
            price: 1800,
            status: ArtworkStatus::Available,
            created_at: "2024-01-15T13:50:00Z",
            location: "Sai Kung, Hong Kong",
            views: 157,
            likes: 52,
        },
        ArtworkSeed {
            id: "6",
            title: "Urban Rhythm",
            description: "An abstract painting capturing the energy and rhythm of Hong Kong's busy streets and markets.",
            artist_id: "3",
            images: &["/artworks/artwork6.jpg"],
            kind: ArtworkType::Physical,
            category: ArtworkCategory::Painting,
            tags: &["abstract", "urban", "colorful", "movement"],
            dimensions: Some((70, 90)),
            price: 1700,
            status: ArtworkStatus::Sold,
            created_at: "2023-08-20T10:15:00Z",
            location: "Wan Chai, Hong Kong",
            views: 203,
            likes: 78,
        },
        ArtworkSeed {
            id: "7",
            title: "Digital Memories of Hong Kong",
            description: "A series of digital illustrations depicting nostalgic scenes from Hong Kong's past, blended with contemporary elements.",
            artist_id: "2",
            images: &["/artworks/artwork7.jpg"],
            kind: ArtworkType::Digital,
            category: ArtworkCategory::Illustration,
            tags: &["nostalgia", "history", "digital", "illustration"],
            dimensions: None,
            price: 950,
            status: ArtworkStatus::Available,
            created_at: "2023-09-05T14:30:00Z",
            location: "Kowloon, Hong Kong",
            views: 167,
            likes: 59,
        },
        ArtworkSeed {
            id: "8",
            title: "Bamboo Dreams",
            description: "A delicate traditional Chinese painting featuring bamboo, symbolizing resilience and flexibility - qualities embodied by Hong Kong.",
            artist_id: "1",
            images: &["/artworks/artwork8.jpg"],
            kind: ArtworkType::Physical,
            category: ArtworkCategory::TraditionalChinese,
            tags: &["bamboo", "traditional", "ink", "symbolic"],
            dimensions: Some((40, 60)),
            price: 1100,
            status: ArtworkStatus::Available,
            created_at: "2023-10-12T09:45:00Z",
            location: "Central, Hong Kong",
            views: 142,
            likes: 47,
        },
    ]
    .iter()
    .map(ArtworkSeed::build)
    .collect()
}

/// Message history between Alex (buyer) and the two artists, plus one
/// thread between the artists themselves.
pub fn messages() -> Result<Vec<Message>, RepositoryError> {
    let rows: [(&str, &str, &str, &str, &str, bool); 9] = [
        (
            "1",
            "2",
            "1",
            "Hello, I really love your mixed media pieces. Would you be interested in creating a custom piece for my living room?",
            "2024-03-15T09:30:00Z",
            true,
        ),
        (
            "2",
            "1",
            "2",
            "Thank you for your interest! I would be happy to discuss a custom piece. Could you tell me more about what you have in mind?",
            "2024-03-15T10:45:00Z",
            true,
        ),
        (
            "3",
            "2",
            "1",
            "I was thinking of a landscape painting featuring Victoria Harbor at sunset, with traditional brushwork but some contemporary elements.",
            "2024-03-15T11:20:00Z",
            true,
        ),
        (
            "4",
            "1",
            "2",
            "That sounds like an interesting project! I can definitely work with that concept. What size were you thinking of?",
            "2024-03-15T14:05:00Z",
            false,
        ),
        (
            "5",
            "2",
            "3",
            "Hi, I saw your digital artwork and I'm impressed by your cyberpunk style. Would you be available for a commission?",
            "2024-03-14T16:20:00Z",
            true,
        ),
        (
            "6",
            "3",
            "2",
            "Hello! Thanks for reaching out. I am currently taking commissions. What kind of piece did you have in mind?",
            "2024-03-14T17:45:00Z",
            true,
        ),
        (
            "7",
            "2",
            "3",
            "I'd like a futuristic interpretation of Hong Kong's skyline that I could use as a digital display in my office.",
            "2024-03-14T18:30:00Z",
            false,
        ),
        (
            "8",
            "3",
            "1",
            "Hello, I'm interested in your mixed media work. Do you create pieces that incorporate textiles?",
            "2024-03-10T11:15:00Z",
            true,
        ),
        (
            "9",
            "1",
            "3",
            "Hi there! Yes, I do work with textiles in my mixed media pieces. I'd be happy to discuss what you're looking for.",
            "2024-03-10T13:40:00Z",
            true,
        ),
    ];

    rows.iter()
        .map(|(id, from, to, content, ts, read)| {
            Ok(Message {
                id: MessageId::new(*id),
                sender_id: UserId::new(*from),
                receiver_id: UserId::new(*to),
                content: (*content).to_string(),
                timestamp: timestamp(ts)?,
                read: *read,
            })
        })
        .collect()
}

/// Group seeded messages into conversations, numbered in order of the first
/// message of each participant pair.
pub fn conversations(messages: &[Message]) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> = Vec::new();

    for message in messages {
        let existing = conversations
            .iter_mut()
            .find(|c| c.is_between(&message.sender_id, &message.receiver_id));

        match existing {
            Some(conversation) => {
                if message.timestamp >= conversation.updated_at {
                    conversation.updated_at = message.timestamp;
                    conversation.last_message = Some(message.clone());
                }
                if message.timestamp < conversation.created_at {
                    conversation.created_at = message.timestamp;
                }
            }
            None => {
                let id = ConversationId::new((conversations.len() + 1).to_string());
                conversations.push(Conversation {
                    id,
                    participants: [message.sender_id.clone(), message.receiver_id.clone()],
                    last_message: Some(message.clone()),
                    created_at: message.timestamp,
                    updated_at: message.timestamp,
                });
            }
        }
    }

    conversations
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_literals_parse() {
        assert_eq!(users().unwrap().len(), 3);
        assert_eq!(artists().len(), 5);
        assert_eq!(artworks().unwrap().len(), 8);
        assert_eq!(messages().unwrap().len(), 9);
    }

    #[test]
    fn test_every_artwork_references_a_seeded_artist() {
        let artists = artists();
        for artwork in artworks().unwrap() {
            assert!(artists.iter().any(|a| a.id == artwork.artist_id));
        }
    }

    #[test]
    fn test_conversations_group_by_participant_pair() {
        let messages = messages().unwrap();
        let conversations = conversations(&messages);
        assert_eq!(conversations.len(), 3);

        let first = &conversations[0];
        assert_eq!(first.id.as_str(), "1");
        assert!(first.is_between(&UserId::new("1"), &UserId::new("2")));
        assert_eq!(first.last_message.as_ref().unwrap().id.as_str(), "4");
        assert_eq!(first.created_at, timestamp("2024-03-15T09:30:00Z").unwrap());
        assert_eq!(first.updated_at, timestamp("2024-03-15T14:05:00Z").unwrap());
    }
}
