//! Blob storage client (Vercel Blob REST API).
//!
//! Uploaded artwork images are stored with public access; the returned URL
//! becomes the artwork's image.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::BlobConfig;

const API_VERSION: &str = "7";

/// Errors that can occur when talking to blob storage.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("blob API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid blob URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// A stored blob.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBlob {
    pub url: String,
    pub pathname: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    blobs: Vec<StoredBlob>,
}

/// Blob storage client.
#[derive(Clone)]
pub struct BlobClient {
    inner: Arc<BlobClientInner>,
}

struct BlobClientInner {
    client: reqwest::Client,
    base_url: url::Url,
}

impl BlobClient {
    /// Create a new blob client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value, the API URL
    /// does not parse, or the HTTP client cannot be built.
    pub fn new(config: &BlobConfig) -> Result<Self, BlobError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.expose_secret()))
            .map_err(|e| BlobError::InvalidToken(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert("x-api-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(BlobClientInner {
                client,
                base_url: url::Url::parse(&config.api_url)?,
            }),
        })
    }

    /// Upload `bytes` under `pathname` with public access.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails or the response cannot be parsed.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn put(
        &self,
        pathname: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, BlobError> {
        let url = self
            .inner
            .base_url
            .join(&urlencoding::encode(pathname))?;

        let response = self
            .inner
            .client
            .put(url)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .body(bytes)
            .send()
            .await?;

        let blob: StoredBlob = Self::parse(response).await?;
        tracing::info!(url = %blob.url, "Blob stored");
        Ok(blob)
    }

    /// List stored blobs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<StoredBlob>, BlobError> {
        let response = self
            .inner
            .client
            .get(self.inner.base_url.clone())
            .send()
            .await?;

        let list: ListResponse = Self::parse(response).await?;
        Ok(list.blobs)
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BlobError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BlobError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| BlobError::Parse(e.to_string()))
    }
}

/// Storage path for an uploaded file: a UUID prefix plus the original name
/// with whitespace runs replaced by `-`.
#[must_use]
pub fn upload_pathname(id: uuid::Uuid, file_name: &str) -> String {
    let name = file_name.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{id}-{name}")
}
