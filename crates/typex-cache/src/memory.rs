//! In-memory cache implementation.
//!
//! [`MemoryCache`] keeps every entry in process memory. Nothing is written to
//! disk and nothing is evicted: entries live as long as the cache itself.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::{Cache, CacheBucket};

/// Entries of a single bucket, keyed by cache key.
type Entries = RwLock<HashMap<String, Vec<u8>>>;

/// In-memory [`Cache`].
///
/// Buckets with the same name share storage, so handles obtained from
/// separate [`bucket`](Cache::bucket) calls see each other's writes. Cloning a
/// `MemoryCache` shares storage as well.
#[derive(Clone, Default)]
pub struct MemoryCache {
    buckets: Arc<Mutex<HashMap<String, Arc<Entries>>>>,
}

impl MemoryCache {
    /// Create an empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        let mut buckets = self.buckets.lock().unwrap();
        let entries = Arc::clone(buckets.entry(name.to_owned()).or_insert_with(|| {
            tracing::debug!("creating in-memory cache bucket: {name}");
            Arc::default()
        }));
        Box::new(MemoryCacheBucket { entries })
    }
}

/// A single bucket backed by a shared map.
struct MemoryCacheBucket {
    entries: Arc<Entries>,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &[u8]) {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_vec());
    }
}
