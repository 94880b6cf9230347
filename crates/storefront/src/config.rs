//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KUCHOSTORE_API_BASE_URL` - Base URL of the store API
//!   (e.g., <https://shop.example.com/>)
//!
//! ## Optional
//! - `KUCHOSTORE_HTTP_TIMEOUT_SECS` - Per-request HTTP timeout in seconds
//!   (default: 10)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is set but does not parse.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront session configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL the API endpoints hang off of.
    pub api_base_url: Url,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            "KUCHOSTORE_API_BASE_URL",
            &get_required_env("KUCHOSTORE_API_BASE_URL")?,
        )?;
        let http_timeout = parse_timeout_secs(
            "KUCHOSTORE_HTTP_TIMEOUT_SECS",
            &get_env_or_default("KUCHOSTORE_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        )?;

        Ok(Self {
            api_base_url,
            http_timeout,
        })
    }

    /// Configuration pointing at an explicit base URL, with the default
    /// timeout. Mostly for tests and embedders that manage their own env.
    #[must_use]
    pub const fn with_base_url(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            http_timeout: Duration::from_secs(10),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate a base URL. Trailing-slash form is required so that
/// `Url::join` keeps the final path segment.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url: Url = value
        .parse()
        .map_err(|e: url::ParseError| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be an http(s) base URL".to_string(),
        ));
    }

    // Normalize so api paths join under the base instead of replacing it.
    if url.path().ends_with('/') {
        Ok(url)
    } else {
        let mut normalized = url;
        let path = format!("{}/", normalized.path());
        normalized.set_path(&path);
        Ok(normalized)
    }
}

/// Parse a timeout expressed in whole seconds.
fn parse_timeout_secs(var_name: &str, value: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = value
        .parse()
        .map_err(|e: std::num::ParseIntError| {
            ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string())
        })?;
    Ok(Duration::from_secs(secs))
}
