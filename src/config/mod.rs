//! Configuration module for the FAQ service.
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Default endpoint of the public Google Translate API.
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP
    pub port: u16,

    // MongoDB
    /// Connection string. When unset the service runs on an in-memory store.
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,

    // Translator
    pub translate_url: Url,
    pub translate_timeout: Duration,

    // Cache
    /// Lifetime of translated (non-English) listings.
    pub listing_ttl: Duration,
    pub cache_capacity: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mongodb_uri = env::var("MONGODB_URI")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let translate_url = env::var("TRANSLATE_URL")
            .unwrap_or_else(|_| DEFAULT_TRANSLATE_URL.to_string());
        let translate_url = Url::parse(&translate_url)
            .with_context(|| format!("Invalid TRANSLATE_URL: {translate_url}"))?;

        Ok(Self {
            port: parse_var("PORT", 3000)?,
            mongodb_uri,
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "faqs".to_string()),
            translate_url,
            translate_timeout: Duration::from_secs(parse_var("TRANSLATE_TIMEOUT_SECS", 10)?),
            listing_ttl: Duration::from_secs(parse_var("FAQ_CACHE_TTL_SECS", 120)?),
            cache_capacity: parse_var("FAQ_CACHE_CAPACITY", 1_000)?,
        })
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_unset() {
        let value: u16 = parse_var("FAQ_TRANSLATE_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_default_translate_url_is_valid() {
        let url = Url::parse(DEFAULT_TRANSLATE_URL).unwrap();
        assert_eq!(url.host_str(), Some("translate.googleapis.com"));
    }
}
