//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`; every error body has the shape `{"error": "..."}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::AI_NOT_CONFIGURED;
use crate::services::auth::AuthError;
use crate::services::messaging::MessagingError;
use crate::services::upload::UploadError;

/// Application-level error type for the marketplace API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Messaging operation failed.
    #[error("Messaging error: {0}")]
    Messaging(#[from] MessagingError),

    /// Artwork upload failed.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// An outbound service call failed. `message` is shown to the client.
    #[error("{message}: {detail}")]
    Upstream { message: String, detail: String },

    /// An outbound service call timed out.
    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    /// No API key configured for the AI service.
    #[error("AI service not configured")]
    AiUnavailable,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// An upstream failure reported to the client as `message`.
    pub fn upstream(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::Upstream {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(_)
            | Self::Upstream { .. }
            | Self::AiUnavailable
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Auth(err) => match err {
                AuthError::MissingCredentials
                | AuthError::MissingFields
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidUserType(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Messaging(err) => match err {
                MessagingError::EmptyContent | MessagingError::MessageToSelf => {
                    StatusCode::BAD_REQUEST
                }
                MessagingError::RecipientNotFound | MessagingError::ConversationNotFound => {
                    StatusCode::NOT_FOUND
                }
                MessagingError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Upload(err) => match err {
                UploadError::MissingFields
                | UploadError::UnsupportedType(_)
                | UploadError::InvalidYear(_) => StatusCode::BAD_REQUEST,
                UploadError::StorageUnavailable
                | UploadError::Storage(_)
                | UploadError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Internal details stay out of it.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Auth(err) => match err {
                AuthError::MissingCredentials => "Email and password are required",
                AuthError::MissingFields => "All fields are required",
                AuthError::InvalidEmail(_) => "Invalid email address",
                AuthError::InvalidUserType(_) => "Invalid user type",
                AuthError::InvalidCredentials => "Invalid email or password",
                AuthError::UserNotFound => "User not found",
                AuthError::UserAlreadyExists => "Email already in use",
                AuthError::Repository(_) => "Internal server error",
            }
            .to_string(),
            Self::Messaging(err) => match err {
                MessagingError::EmptyContent => "Message content is required",
                MessagingError::MessageToSelf => "Cannot send a message to yourself",
                MessagingError::RecipientNotFound => "Recipient not found",
                MessagingError::ConversationNotFound => "Conversation not found",
                MessagingError::Repository(_) => "Internal server error",
            }
            .to_string(),
            Self::Upload(err) => match err {
                UploadError::MissingFields => "Missing required fields".to_string(),
                UploadError::UnsupportedType(_) => {
                    "File type not allowed. Please upload a JPEG, PNG, or WEBP image.".to_string()
                }
                UploadError::InvalidYear(_) => "Year must be a number".to_string(),
                UploadError::StorageUnavailable | UploadError::Storage(_) => {
                    format!("Failed to upload artwork: {err}")
                }
                UploadError::Repository(_) => "Failed to upload artwork".to_string(),
            },
            Self::Upstream { message, .. } => message.clone(),
            Self::AiUnavailable => AI_NOT_CONFIGURED.to_string(),
            Self::GatewayTimeout(msg)
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added artwork", Some(&[("artwork_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let (status, body) = body_of(AppError::NotFound("Artwork not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Artwork not found"}));
    }

    #[tokio::test]
    async fn test_auth_error_mapping() {
        let (status, body) = body_of(AuthError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");

        let (status, body) = body_of(AuthError::UserAlreadyExists.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already in use");
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let err = AppError::Database(RepositoryError::DataCorruption("bad seed".into()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_upstream_relays_user_message() {
        let err = AppError::upstream("Failed to analyze artwork", "connection reset");
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to analyze artwork");

        let (status, _) = body_of(AppError::GatewayTimeout("slow".into())).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Unauthorized("Not authenticated".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(MessagingError::MessageToSelf).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(UploadError::InvalidYear("soon".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::AiUnavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
