//! Artwork upload and blob storage diagnostics.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::upload::{self, ArtworkUpload, UploadedFile};
use crate::state::AppState;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

fn multipart_error(e: &MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid upload: {}", e.body_text()))
}

/// Collect the form fields. Unknown fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<ArtworkUpload> {
    let mut form = ArtworkUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(&e))? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("artwork").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                form.file = Some(UploadedFile {
                    name: file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "title" | "year" | "medium" | "description" | "artistId" => {
                let value = field.text().await.map_err(|e| multipart_error(&e))?;
                match name.as_str() {
                    "title" => form.title = value,
                    "year" => form.year = value,
                    "medium" => form.medium = value,
                    "description" => form.description = value,
                    _ => form.artist_id = value,
                }
            }
            _ => tracing::debug!(field = %name, "Ignoring unknown upload field"),
        }
    }

    Ok(form)
}

/// Store an artwork image and list the artwork.
///
/// POST /api/upload-artwork (multipart)
#[instrument(skip_all)]
pub async fn upload_artwork(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>> {
    let form = read_upload(multipart).await?;
    let artwork = upload::upload_artwork(state.db(), state.blob(), form).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Artwork uploaded successfully",
        "artwork": artwork,
    })))
}

/// Check that blob storage is reachable with the configured token.
///
/// GET /api/test-blob
///
/// Failures use their own body shape, `{success, error, details}`.
#[instrument(skip_all)]
pub async fn test_blob(State(state): State<AppState>) -> Response {
    let Some(blob) = state.blob() else {
        return blob_failure("Blob storage is not configured", "BLOB_READ_WRITE_TOKEN is not set");
    };

    match blob.list().await {
        Ok(blobs) => Json(json!({
            "success": true,
            "message": "Blob storage connection successful",
            "blobCount": blobs.len(),
            "hasToken": true,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Blob storage check failed");
            blob_failure("Failed to connect to blob storage", &e.to_string())
        }
    }
}

fn blob_failure(error: &str, details: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": error,
            "details": details,
        })),
    )
        .into_response()
}
