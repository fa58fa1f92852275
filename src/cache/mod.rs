//! Cache module - listing cache built on Moka.
//!
//! ## Architecture
//!
//! - `CacheConfig` - capacity and TTL for a cache instance
//! - `TypedCache` - typed wrapper over Moka where each insert picks its own lifetime
//! - `ListingCache` - the key/value contract the FAQ service talks to
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache = MokaListingCache::new(CacheConfig::listings());
//!
//! cache.set_expiring(&listing_key("es"), json).await?;
//! let hit = cache.get(&listing_key("es")).await?;
//! ```

mod config;
mod listing;
mod typed;

pub use config::CacheConfig;
pub use listing::{ListingCache, MokaListingCache, listing_key};
pub use typed::TypedCache;
