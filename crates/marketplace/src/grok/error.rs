//! Error types for the Grok API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Grok API.
#[derive(Debug, Error)]
pub enum GrokError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message relayed from the API.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The first choice carried no message content.
    #[error("response contained no content")]
    EmptyResponse,
}

impl GrokError {
    /// Map a transport error, separating timeouts from other failures.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// OpenAI-style error body: `{"error": {"message": ...}}` or `{"error": "..."}`.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Detailed { message: String },
    Plain(String),
}

impl ApiErrorBody {
    pub fn into_message(self) -> String {
        match self {
            Self::Detailed { message } | Self::Plain(message) => message,
        }
    }
}
