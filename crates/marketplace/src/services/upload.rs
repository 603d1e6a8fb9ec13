//! Artwork upload: store the image in blob storage and list the artwork.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use artconnect_core::{ArtistId, ArtworkCategory, ArtworkId, ArtworkStatus, ArtworkType};

use crate::blob::{BlobClient, BlobError, upload_pathname};
use crate::db::artworks::ArtworkRepository;
use crate::db::{Database, RepositoryError};
use crate::models::Artwork;

/// Image types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("missing required fields")]
    MissingFields,

    #[error("file type not allowed: {0}")]
    UnsupportedType(String),

    #[error("invalid year: {0}")]
    InvalidYear(String),

    #[error("blob storage is not configured")]
    StorageUnavailable,

    #[error("{0}")]
    Storage(#[from] BlobError),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// The file part of an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields collected from the upload form. Absent fields are empty.
#[derive(Debug, Clone, Default)]
pub struct ArtworkUpload {
    pub file: Option<UploadedFile>,
    pub title: String,
    pub year: String,
    pub medium: String,
    pub description: String,
    pub artist_id: String,
}

impl ArtworkUpload {
    /// Check required fields, content type and year.
    fn validate(&self) -> Result<(&UploadedFile, i32), UploadError> {
        let file = self
            .file
            .as_ref()
            .filter(|f| !f.bytes.is_empty())
            .ok_or(UploadError::MissingFields)?;

        if [&self.title, &self.year, &self.medium, &self.artist_id]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(UploadError::MissingFields);
        }

        if !ALLOWED_CONTENT_TYPES.contains(&file.content_type.as_str()) {
            return Err(UploadError::UnsupportedType(file.content_type.clone()));
        }

        let year = self
            .year
            .trim()
            .parse()
            .map_err(|_| UploadError::InvalidYear(self.year.clone()))?;

        Ok((file, year))
    }
}

/// Preferred upload number: the last six digits of the millisecond clock.
fn upload_number(millis: i64) -> u32 {
    u32::try_from(millis.rem_euclid(1_000_000)).unwrap_or_default()
}

/// Store the image and append the artwork to the catalog.
///
/// # Errors
///
/// Returns a validation error before anything is stored,
/// `UploadError::StorageUnavailable` without a blob client, and
/// `UploadError::Storage` if the upload itself fails.
#[instrument(skip_all, fields(artist_id = %upload.artist_id))]
pub async fn upload_artwork(
    db: &Database,
    blob: Option<&BlobClient>,
    upload: ArtworkUpload,
) -> Result<Artwork, UploadError> {
    let (file, year) = upload.validate()?;
    let blob = blob.ok_or(UploadError::StorageUnavailable)?;

    let pathname = upload_pathname(uuid::Uuid::new_v4(), &file.name);
    let stored = blob
        .put(&pathname, file.bytes.clone(), &file.content_type)
        .await?;

    let now = Utc::now();
    let medium_lower = upload.medium.to_lowercase();
    let artwork = Artwork {
        // assigned by the repository
        id: ArtworkId::new(String::new()),
        title: upload.title.trim().to_string(),
        description: upload.description.trim().to_string(),
        artist_id: ArtistId::new(upload.artist_id.trim()),
        images: vec![stored.url],
        kind: if medium_lower.contains("digital") {
            ArtworkType::Digital
        } else {
            ArtworkType::Physical
        },
        category: ArtworkCategory::from_medium(&upload.medium),
        tags: Vec::new(),
        dimensions: None,
        price: None,
        currency: None,
        status: ArtworkStatus::NotForSale,
        created_at: now,
        location: String::new(),
        views: 0,
        likes: 0,
        year: Some(year),
        medium: Some(upload.medium.trim().to_string()),
    };

    let artwork = ArtworkRepository::new(db)
        .insert_upload(artwork, upload_number(now.timestamp_millis()))
        .await?;
    tracing::info!(artwork_id = %artwork.id, "Artwork uploaded");
    Ok(artwork)
}
