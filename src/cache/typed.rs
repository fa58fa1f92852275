//! Typed cache wrapper around Moka with per-entry expiration.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::sync::Cache;

use super::CacheConfig;

/// Value stored in the underlying cache together with its own lifetime.
#[derive(Debug, Clone)]
struct Expiring<V> {
    value: V,
    ttl: Option<Duration>,
}

/// Expiry policy that reads the lifetime off each entry.
///
/// Overwriting a key restarts its clock with the new entry's lifetime,
/// so a persistent write replaces an expiring one and vice versa.
struct PerEntryExpiry;

impl<K, V> Expiry<K, Expiring<V>> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &K,
        value: &Expiring<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &K,
        value: &Expiring<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// A typed cache wrapper that provides a clean API over Moka.
///
/// This cache is:
/// - Thread-safe (uses Arc internally)
/// - Bounded by capacity, with an optional TTL chosen per insert
/// - Clone-friendly (cloning is cheap, shares the same underlying cache)
pub struct TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Cache<K, Expiring<V>>>,
    name: Arc<str>,
    ttl: Duration,
}

// Manual Clone implementation that doesn't require K: Clone
impl<K, V> Clone for TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
            ttl: self.ttl,
        }
    }
}

impl<K, V> TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new typed cache with the given name and config.
    pub fn new(name: impl Into<Arc<str>>, config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        Self {
            inner: Arc::new(inner),
            name: name.into(),
            ttl: config.ttl,
        }
    }

    /// Get the name of this cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lifetime used by [`insert_expiring`](Self::insert_expiring).
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Insert a value that never expires based on time.
    pub fn insert(&self, key: K, value: V) {
        self.inner.insert(key, Expiring { value, ttl: None });
    }

    /// Insert a value that expires after the configured TTL.
    pub fn insert_expiring(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.ttl);
    }

    /// Insert a value that expires after `ttl`.
    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.inner.insert(key, Expiring { value, ttl: Some(ttl) });
    }

    /// Get a value from the cache.
    ///
    /// Returns `Some(value)` if the key exists and hasn't expired.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).map(|entry| entry.value)
    }
}

impl<K, V> std::fmt::Debug for TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedCache")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
