//! Listing cache - rendered FAQ lists keyed by language.
//!
//! Entries are JSON text under `faqs:<lang>`. The cache is a disposable
//! projection of the record store; every reader must tolerate a miss.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::{CacheConfig, TypedCache};

/// Prefix shared by all listing keys.
pub const LISTING_KEY_PREFIX: &str = "faqs:";

/// Build the cache key for a language listing, e.g. `faqs:es`.
pub fn listing_key(lang: &str) -> String {
    format!("{LISTING_KEY_PREFIX}{lang}")
}

/// Key/value store for rendered listings.
///
/// Shaped after a Redis-like string store: values are opaque JSON text,
/// `set` never expires and `set_expiring` applies the cache TTL.
#[async_trait]
pub trait ListingCache: Send + Sync {
    /// Read a listing. `Ok(None)` on miss or after expiry.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a listing that never expires.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Write a listing that expires after the cache TTL.
    async fn set_expiring(&self, key: &str, value: String) -> Result<()>;
}

/// In-process listing cache backed by Moka.
#[derive(Debug, Clone)]
pub struct MokaListingCache {
    cache: TypedCache<String, String>,
}

impl MokaListingCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            cache: TypedCache::new("faq_listings", config),
        }
    }
}

#[async_trait]
impl ListingCache for MokaListingCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(&key.to_string()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.cache.insert(key.to_string(), value);
        debug!("{}: stored {} without expiry", self.cache.name(), key);
        Ok(())
    }

    async fn set_expiring(&self, key: &str, value: String) -> Result<()> {
        self.cache.insert_expiring(key.to_string(), value);
        debug!(
            "{}: stored {} for {:?}",
            self.cache.name(),
            key,
            self.cache.ttl()
        );
        Ok(())
    }
}
