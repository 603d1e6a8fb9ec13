//! Grok API client.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::GrokConfig;

use super::error::{ApiErrorResponse, GrokError};
use super::types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

/// Per-request generation settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Ask for a `json_object` reply.
    pub json: bool,
}

impl ChatOptions {
    #[must_use]
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature: Some(temperature),
            max_tokens: Some(max_tokens),
            json: false,
        }
    }

    #[must_use]
    pub const fn json() -> Self {
        Self {
            temperature: None,
            max_tokens: None,
            json: true,
        }
    }
}

/// Grok chat-completions client.
///
/// Cheap to clone; the HTTP connection pool is shared.
#[derive(Clone)]
pub struct GrokClient {
    inner: Arc<GrokClientInner>,
}

struct GrokClientInner {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl GrokClient {
    /// Create a new Grok client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(config: &GrokConfig) -> Result<Self, GrokError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.expose_secret()))
            .map_err(|_| GrokError::Unauthorized("API key is not a valid header value".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(GrokClientInner {
                client,
                api_url: config.api_url.clone(),
                model: config.model.clone(),
            }),
        })
    }

    /// Send a conversation and return the first choice's content.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, the API returns an
    /// error status, or the reply carries no content.
    #[instrument(skip(self, messages), fields(model = %self.inner.model, messages = messages.len()))]
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<String, GrokError> {
        let request = ChatRequest {
            model: &self.inner.model,
            messages,
            stream: false,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: options.json.then_some(ResponseFormat::JSON_OBJECT),
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&request)
            .send()
            .await
            .map_err(GrokError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await.map_err(GrokError::from_transport)?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GrokError::Parse(format!("Failed to parse response: {e}")))?;

        let content = parsed
            .into_content()
            .filter(|c| !c.trim().is_empty())
            .ok_or(GrokError::EmptyResponse)?;

        tracing::debug!(chars = content.len(), "Grok reply received");
        Ok(content)
    }

    /// Map an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GrokError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return GrokError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return GrokError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => {
                let message = serde_json::from_str::<ApiErrorResponse>(&body)
                    .map_or(body, |api_error| api_error.error.into_message());
                GrokError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
            Err(e) => GrokError::from_transport(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_client_builds_from_config() {
        let config = GrokConfig {
            api_key: SecretString::from("xai-k8Qz3vLm9Rt2Wp7Yn4Bc6Df1Gh5Jk0"),
            api_url: "https://api.x.ai/v1/chat/completions".to_string(),
            model: "grok-4".to_string(),
            timeout: Duration::from_secs(20),
        };
        assert!(GrokClient::new(&config).is_ok());
    }

    #[test]
    fn test_rejects_key_with_newline() {
        let config = GrokConfig {
            api_key: SecretString::from("bad\nkey"),
            api_url: "https://api.x.ai/v1/chat/completions".to_string(),
            model: "grok-4".to_string(),
            timeout: Duration::from_secs(20),
        };
        assert!(matches!(
            GrokClient::new(&config),
            Err(GrokError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_grok_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<GrokClient>();
    }
}
