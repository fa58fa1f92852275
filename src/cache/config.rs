//! Cache configuration.

use std::time::Duration;

/// Configuration for a cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Lifetime applied by [`TypedCache::insert_expiring`](super::TypedCache::insert_expiring).
    /// Plain inserts never expire based on time.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl CacheConfig {
    /// Set max capacity for cache (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set time-to-live for expiring entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = duration;
        self
    }

    /// Config for rendered FAQ listings.
    /// One entry per language, translated listings live 2 minutes.
    pub fn listings() -> Self {
        Self {
            max_capacity: 1_000,
            ttl: Duration::from_secs(120),
        }
    }
}
