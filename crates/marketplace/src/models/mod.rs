//! Domain models for the marketplace.

pub mod artist;
pub mod artwork;
pub mod message;
pub mod session;
pub mod user;

pub use artist::{Artist, ArtistSocialLinks};
pub use artwork::{Artwork, ArtworkFilter, DimensionUnit, Dimensions};
pub use message::{Conversation, ConversationSummary, Message, Participant};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewUser, PublicUser, SocialLink, User, UserProfile};
