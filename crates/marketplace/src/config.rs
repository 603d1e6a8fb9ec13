//! Marketplace configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ARTCONNECT_HOST` - Bind address (default: 127.0.0.1)
//! - `ARTCONNECT_PORT` - Listen port (default: 3000)
//! - `ARTCONNECT_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `XAI_API_KEY` - Grok API key; AI features are disabled without it
//! - `GROK_API_URL` - Chat-completions endpoint (default: xAI)
//! - `GROK_MODEL` - Model ID (default: grok-4)
//! - `AI_TIMEOUT_SECS` - Client timeout for AI calls (default: 20)
//! - `BLOB_READ_WRITE_TOKEN` - Blob storage token; uploads are disabled without it
//! - `BLOB_API_URL` - Blob storage endpoint (default: Vercel Blob)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

const DEFAULT_GROK_API_URL: &str = "https://api.x.ai/v1/chat/completions";
const DEFAULT_GROK_MODEL: &str = "grok-4";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 20;
const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Marketplace application configuration.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the marketplace
    pub base_url: String,
    /// Grok chat-completions configuration (AI features disabled when absent)
    pub grok: Option<GrokConfig>,
    /// Blob storage configuration (uploads disabled when absent)
    pub blob: Option<BlobConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Grok (OpenAI-compatible) API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GrokConfig {
    pub api_key: SecretString,
    pub api_url: String,
    pub model: String,
    /// Per-request client timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for GrokConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrokConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Blob storage configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct BlobConfig {
    pub token: SecretString,
    pub api_url: String,
}

impl std::fmt::Debug for BlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobConfig")
            .field("token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl MarketplaceConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid or if a secret fails
    /// validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ARTCONNECT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ARTCONNECT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("ARTCONNECT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ARTCONNECT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("ARTCONNECT_BASE_URL", "http://localhost:3000");

        let grok = GrokConfig::from_env()?;
        let blob = BlobConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            base_url,
            grok,
            blob,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for local runs and tests: defaults everywhere, no
    /// outbound services.
    #[must_use]
    pub fn local() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            grok: None,
            blob: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl GrokConfig {
    /// Load Grok configuration from environment.
    ///
    /// Returns `None` if `XAI_API_KEY` is not set (AI features disabled).
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(key) = get_optional_env("XAI_API_KEY") else {
            return Ok(None);
        };
        validate_secret_strength(&key, "XAI_API_KEY")?;

        let timeout_secs = get_optional_env("AI_TIMEOUT_SECS")
            .map(|s| {
                s.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("AI_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_AI_TIMEOUT_SECS);

        Ok(Some(Self {
            api_key: SecretString::from(key),
            api_url: get_env_or_default("GROK_API_URL", DEFAULT_GROK_API_URL),
            model: get_env_or_default("GROK_MODEL", DEFAULT_GROK_MODEL),
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}

impl BlobConfig {
    /// Load blob storage configuration from environment.
    ///
    /// Returns `None` if `BLOB_READ_WRITE_TOKEN` is not set (uploads disabled).
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(token) = get_optional_env("BLOB_READ_WRITE_TOKEN") else {
            return Ok(None);
        };
        validate_secret_strength(&token, "BLOB_READ_WRITE_TOKEN")?;

        Ok(Some(Self {
            token: SecretString::from(token),
            api_url: get_env_or_default("BLOB_API_URL", DEFAULT_BLOB_API_URL),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by the provider."
            ),
        ));
    }

    Ok(())
}
