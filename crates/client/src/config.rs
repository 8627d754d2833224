//! Catalog client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKET_API_BASE_URL` - Base URL of the catalog API (e.g., <https://api.example.com/v1>)
//!
//! ## Optional
//! - `MARKET_API_TOKEN` - Bearer token sent with every request
//! - `MARKET_API_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
//! - `MARKET_CACHE_TTL_SECS` - How long fetched entries stay cached (default: 300)
//! - `MARKET_CACHE_CAPACITY` - Maximum number of cached entries (default: 1000)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_CACHE_TTL_SECS: &str = "300";
const DEFAULT_CACHE_CAPACITY: &str = "1000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog API client configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: Url,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Time to live of cached responses
    pub cache_ttl: Duration,
    /// Maximum number of cached responses
    pub cache_capacity: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration with default timeout and cache settings.
    ///
    /// A trailing slash is added to the base URL path so relative endpoint
    /// paths join below it.
    #[must_use]
    pub fn new(mut base_url: Url) -> Self {
        ensure_trailing_slash(&mut base_url);
        Self {
            base_url,
            api_token: None,
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 1000,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL is missing or any variable fails
    /// to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(
            "MARKET_API_BASE_URL",
            &get_required_env("MARKET_API_BASE_URL")?,
        )?;
        let api_token = get_optional_env("MARKET_API_TOKEN")
            .filter(|token| !token.is_empty())
            .map(SecretString::from);
        let timeout_secs = parse_number(
            "MARKET_API_TIMEOUT_SECS",
            &get_env_or_default("MARKET_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "MARKET_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let cache_ttl_secs = parse_number(
            "MARKET_CACHE_TTL_SECS",
            &get_env_or_default("MARKET_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS),
        )?;
        let cache_capacity = parse_number(
            "MARKET_CACHE_CAPACITY",
            &get_env_or_default("MARKET_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY),
        )?;

        Ok(Self {
            base_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cache_capacity,
        })
    }

    /// Use a bearer token.
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::from(token.into()));
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an absolute `http(s)` URL, ensuring a trailing slash so endpoint
/// paths join under it.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    ensure_trailing_slash(&mut url);
    Ok(url)
}

fn ensure_trailing_slash(url: &mut Url) {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("TEST_URL", "https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(
            url.join("products/4").unwrap().as_str(),
            "https://api.example.com/v1/products/4"
        );
    }

    #[test]
    fn test_new_keeps_last_path_segment() {
        let config = ClientConfig::new(Url::parse("https://h.example.com/v1").unwrap());
        assert_eq!(config.base_url.as_str(), "https://h.example.com/v1/");
        assert_eq!(
            config.base_url.join("products/4").unwrap().as_str(),
            "https://h.example.com/v1/products/4"
        );
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("TEST_URL", "http://localhost:8080/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_parse_base_url_rejects_relative() {
        let err = parse_base_url("TEST_URL", "api/v1").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "TEST_URL"));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("TEST_URL", "ftp://files.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("TEST_NUM", " 30 ").unwrap(), 30);
        assert!(parse_number("TEST_NUM", "ten").is_err());
        assert!(parse_number("TEST_NUM", "-1").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new(Url::parse("https://api.example.com/").unwrap())
            .with_api_token("sk_live_abc123");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk_live_abc123"));
    }
}
