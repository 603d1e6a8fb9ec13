//! Artist repository.

use artconnect_core::ArtistId;

use super::Database;
use crate::models::Artist;

pub struct ArtistRepository<'a> {
    db: &'a Database,
}

impl<'a> ArtistRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: &ArtistId) -> Option<Artist> {
        self.db
            .artists
            .read()
            .await
            .iter()
            .find(|artist| &artist.id == id)
            .cloned()
    }

    pub async fn list(&self) -> Vec<Artist> {
        self.db.artists.read().await.clone()
    }
}
