//! Cache abstraction layer for typex.
//!
//! This crate provides generic caching traits that decouple cache consumers
//! from the underlying storage mechanism. Two traits form the core API:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Key-value store
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`MemoryCache`]: In-memory implementation that lives as long as the process
//!
//! # Example
//!
//! ```
//! use typex_cache::{Cache, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let bucket = cache.bucket("renders");
//! bucket.set("example", b"<svg/>");
//! assert_eq!(bucket.get("example"), Some(b"<svg/>".to_vec()));
//! ```

mod memory;
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Keys are expected to be content hashes: a key fully determines its value,
/// so entries never go stale and are never invalidated.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value, or `None` on a miss.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value, overwriting any existing entry for the same key.
    fn set(&self, key: &str, value: &[u8]);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// A `Cache` produces buckets that are logically isolated from each other.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Calling `bucket` multiple times with the same name returns handles that
    /// share the same underlying storage.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
///
/// Every `get` returns `None`; every `set` is silently discarded.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8]) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cache_always_misses() {
        let cache = NullCache;
        let bucket = cache.bucket("renders");

        assert_eq!(bucket.get("key"), None);

        // Setting a value and reading it back still returns None
        bucket.set("key", b"hello");
        assert_eq!(bucket.get("key"), None);
    }

    #[test]
    fn test_null_cache_different_buckets_all_miss() {
        let cache = NullCache;

        for name in &["renders", "fragments"] {
            let bucket = cache.bucket(name);
            bucket.set("k", b"data");
            assert_eq!(bucket.get("k"), None, "bucket {name} should miss");
        }
    }
}
