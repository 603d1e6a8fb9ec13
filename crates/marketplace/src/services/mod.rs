//! Business logic services for the marketplace.
//!
//! # Services
//!
//! - `auth` - Login and signup against the user store
//! - `messaging` - Conversations, unread counts, sending messages
//! - `search` - Catalog search, query suggestions, similar artworks
//! - `pricing` - Price range suggestions for an artwork
//! - `feedback` - Artwork critique and enhancement chat
//! - `matchmaking` - Artist recommendations for a buyer's preferences
//! - `upload` - Storing an uploaded image and listing it as an artwork
//!
//! Services borrow what they need from [`AppState`](crate::state::AppState)
//! for the duration of one request.

pub mod auth;
pub mod feedback;
pub mod matchmaking;
pub mod messaging;
pub mod pricing;
pub mod search;
pub mod upload;

/// Error message returned when an AI route is called without an API key.
pub const AI_NOT_CONFIGURED: &str = "AI service is not configured";
