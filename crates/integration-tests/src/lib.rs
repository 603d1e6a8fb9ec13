//! Integration tests for the ArtConnect marketplace.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`.
//! AI and blob clients are unconfigured by default; suites that need them
//! start a stand-in upstream on `127.0.0.1:0` with [`spawn_upstream`] and
//! point the client configuration at it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p artconnect-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth` - Login, signup, logout and session identity
//! - `cart` - Session cart operations
//! - `messaging` - Conversations, unread counts, sending
//! - `catalog` - Listing, search and recommendations
//! - `uploads_and_ai` - Upload validation and AI route errors
//! - `upstream` - Grok and blob clients against a stand-in upstream

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use artconnect_marketplace::{
    config::{BlobConfig, GrokConfig, MarketplaceConfig},
    db::{Database, seed::DEMO_PASSWORD},
    state::AppState,
};

/// API key the stand-in upstreams expect as a bearer token.
pub const UPSTREAM_TOKEN: &str = "xai-k8Qz3vLm9Rt2Wp7Yn4Bc6Df1Gh5Jk0";

/// Serve `router` on an ephemeral local port and return its base URL
/// (`http://127.0.0.1:<port>`). The server lives until the runtime stops.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind a local port");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://{addr}")
}

/// Grok configuration pointing at a stand-in upstream.
#[must_use]
pub fn grok_config(base_url: &str, timeout: Duration) -> GrokConfig {
    GrokConfig {
        api_key: SecretString::from(UPSTREAM_TOKEN),
        api_url: format!("{base_url}/v1/chat/completions"),
        model: "grok-test".to_string(),
        timeout,
    }
}

/// Blob configuration pointing at a stand-in upstream.
#[must_use]
pub fn blob_config(base_url: &str) -> BlobConfig {
    BlobConfig {
        token: SecretString::from(UPSTREAM_TOKEN),
        api_url: format!("{base_url}/"),
    }
}

/// A chat-completions body whose first choice carries `content`.
#[must_use]
pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }],
    })
}

pub use serde_json::json;

/// A response with its body read and, when possible, parsed as JSON.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    /// `Value::Null` when the body is not JSON.
    pub body: Value,
}

impl TestResponse {
    /// The `error` message of an error body.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// The marketplace router plus the session cookie of one client.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// A fresh app over the seeded store, with no client session.
    ///
    /// # Panics
    ///
    /// Panics if the seed data or the state cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MarketplaceConfig::local())
    }

    /// A fresh app over the seeded store using `config`, e.g. with Grok or
    /// blob storage pointed at [`spawn_upstream`].
    ///
    /// # Panics
    ///
    /// Panics if the seed data or the state cannot be built.
    #[must_use]
    pub fn with_config(config: MarketplaceConfig) -> Self {
        let db = Database::seeded().expect("seed data should load");
        let state = AppState::new(config, db).expect("state should build");
        Self {
            router: artconnect_marketplace::app(state),
            cookie: None,
        }
    }

    /// A second client against the same server, without a session.
    #[must_use]
    pub fn new_client(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, Body::empty(), None).await
    }

    pub async fn post_json(&mut self, uri: &str, body: &Value) -> TestResponse {
        self.request(
            Method::POST,
            uri,
            Body::from(body.to_string()),
            Some("application/json"),
        )
        .await
    }

    /// POST a multipart form built from text fields and an optional file
    /// `(name, content type, bytes)`.
    pub async fn post_multipart(
        &mut self,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
    ) -> TestResponse {
        const BOUNDARY: &str = "artconnect-test-boundary";

        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, content_type, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
        self.request(Method::POST, uri, Body::from(body), Some(&content_type))
            .await
    }

    /// Log in with the seeded demo password.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login(&mut self, email: &str) -> TestResponse {
        let response = self
            .post_json(
                "/api/auth/login",
                &json!({ "email": email, "password": DEMO_PASSWORD }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.text);
        response
    }

    /// Send a request, carrying the session cookie in both directions.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn request(
        &mut self,
        method: Method,
        uri: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// IDs of a JSON array of objects with an `id` field.
#[must_use]
pub fn ids(values: &Value) -> Vec<String> {
    values
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
