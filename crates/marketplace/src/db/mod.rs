//! In-memory data store for the marketplace.
//!
//! # Collections
//!
//! - `users` - Accounts (plaintext passwords, mock only)
//! - `artists` - Public artist profiles referenced by artworks
//! - `artworks` - Catalog listings; uploads are appended
//! - `messages` / `conversations` - Direct messaging, behind a single lock
//!
//! Everything is seeded at start-up (see [`seed`]) and lost on restart.
//! Handlers never touch the collections directly; they go through the
//! repository types in the submodules.

pub mod artists;
pub mod artworks;
pub mod messages;
pub mod seed;
pub mod users;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Artist, Artwork, Conversation, Message, User};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Seed or stored data is invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Messages and conversations change together, so they share one lock.
#[derive(Debug, Default)]
pub(crate) struct MessageTables {
    pub messages: Vec<Message>,
    pub conversations: Vec<Conversation>,
}

/// The shared in-memory store.
#[derive(Debug, Default)]
pub struct Database {
    pub(crate) users: RwLock<Vec<User>>,
    pub(crate) artists: RwLock<Vec<Artist>>,
    pub(crate) artworks: RwLock<Vec<Artwork>>,
    pub(crate) messaging: RwLock<MessageTables>,
}

impl Database {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store populated with the demo users, artists, artworks and messages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a seed literal fails to
    /// parse.
    pub fn seeded() -> Result<Self, RepositoryError> {
        let messages = seed::messages()?;
        let conversations = seed::conversations(&messages);

        Ok(Self {
            users: RwLock::new(seed::users()?),
            artists: RwLock::new(seed::artists()),
            artworks: RwLock::new(seed::artworks()?),
            messaging: RwLock::new(MessageTables {
                messages,
                conversations,
            }),
        })
    }
}
