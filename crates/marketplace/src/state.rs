//! Application state shared across handlers.

use std::sync::Arc;

use crate::blob::{BlobClient, BlobError};
use crate::config::MarketplaceConfig;
use crate::db::Database;
use crate::error::AppError;
use crate::grok::{GrokClient, GrokError};

/// Error building the outbound clients.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("grok client: {0}")]
    Grok(#[from] GrokError),
    #[error("blob client: {0}")]
    Blob(#[from] BlobError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// in-memory store and the optional outbound clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MarketplaceConfig,
    db: Database,
    grok: Option<GrokClient>,
    blob: Option<BlobClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Grok and blob clients are built only when their configuration is
    /// present.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured client cannot be built.
    pub fn new(config: MarketplaceConfig, db: Database) -> Result<Self, StateError> {
        let grok = config.grok.as_ref().map(GrokClient::new).transpose()?;
        let blob = config.blob.as_ref().map(BlobClient::new).transpose()?;

        if grok.is_none() {
            tracing::warn!("XAI_API_KEY not set, AI features disabled");
        }
        if blob.is_none() {
            tracing::warn!("BLOB_READ_WRITE_TOKEN not set, uploads disabled");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                grok,
                blob,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &MarketplaceConfig {
        &self.inner.config
    }

    /// The in-memory store.
    #[must_use]
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    #[must_use]
    pub fn grok(&self) -> Option<&GrokClient> {
        self.inner.grok.as_ref()
    }

    /// The Grok client, or the error AI routes return without one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AiUnavailable` when no API key is configured.
    pub fn require_grok(&self) -> Result<&GrokClient, AppError> {
        self.grok().ok_or(AppError::AiUnavailable)
    }

    #[must_use]
    pub fn blob(&self) -> Option<&BlobClient> {
        self.inner.blob.as_ref()
    }
}
