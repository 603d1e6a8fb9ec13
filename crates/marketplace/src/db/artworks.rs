//! Artwork repository.

use artconnect_core::{ArtistId, ArtworkId};

use super::{Database, RepositoryError};
use crate::models::{Artwork, ArtworkFilter};

/// Uploaded artworks are numbered `IMG000000` through `IMG999999`.
const UPLOAD_ID_SPACE: u32 = 1_000_000;

fn upload_id(number: u32) -> ArtworkId {
    ArtworkId::new(format!("IMG{number:06}"))
}

/// Repository for catalog operations.
pub struct ArtworkRepository<'a> {
    db: &'a Database,
}

impl<'a> ArtworkRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All artworks in listing order.
    pub async fn all(&self) -> Vec<Artwork> {
        self.db.artworks.read().await.clone()
    }

    /// Artworks matching `filter`, in listing order.
    pub async fn list(&self, filter: &ArtworkFilter) -> Vec<Artwork> {
        self.db
            .artworks
            .read()
            .await
            .iter()
            .filter(|artwork| filter.matches(artwork))
            .cloned()
            .collect()
    }

    pub async fn get_by_id(&self, id: &ArtworkId) -> Option<Artwork> {
        self.db
            .artworks
            .read()
            .await
            .iter()
            .find(|artwork| &artwork.id == id)
            .cloned()
    }

    pub async fn by_artist(&self, artist_id: &ArtistId) -> Vec<Artwork> {
        self.db
            .artworks
            .read()
            .await
            .iter()
            .filter(|artwork| &artwork.artist_id == artist_id)
            .cloned()
            .collect()
    }

    /// Append an uploaded artwork under the first free `IMG` number at or
    /// after `number`, wrapping at `IMG999999`. The artwork's own ID is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` only if every upload number is taken.
    pub async fn insert_upload(
        &self,
        mut artwork: Artwork,
        number: u32,
    ) -> Result<Artwork, RepositoryError> {
        let mut artworks = self.db.artworks.write().await;

        artwork.id = (0..UPLOAD_ID_SPACE)
            .map(|offset| upload_id((number % UPLOAD_ID_SPACE + offset) % UPLOAD_ID_SPACE))
            .find(|id| !artworks.iter().any(|existing| &existing.id == id))
            .ok_or_else(|| RepositoryError::Conflict("no free upload IDs".to_string()))?;

        artworks.push(artwork.clone());
        Ok(artwork)
    }
}
