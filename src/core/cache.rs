//! In-memory response cache for the FPL access layer.
//!
//! Entries are keyed by the request shape (endpoint plus serialized query
//! parameters) and hold the decoded JSON body behind an `Arc`, so repeated
//! hits on the large bootstrap payload do not deep-copy it. Nothing is evicted
//! by size; an entry lives until `clear` unless a TTL was configured.

use lru::LruCache;
use serde_json::Value;
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

/// Cache key for a GET request: endpoint path plus serialized query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub endpoint: String,
    pub params: String,
}

impl CacheKey {
    /// Parameters are sorted so `[(a,1),(b,2)]` and `[(b,2),(a,1)]` share a key.
    pub fn new(endpoint: &str, params: Option<&[(String, String)]>) -> Self {
        let params = params
            .map(|pairs| {
                let mut pairs: Vec<String> =
                    pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
                pairs.sort();
                pairs.join("&")
            })
            .unwrap_or_default();

        Self {
            endpoint: endpoint.trim_start_matches('/').to_string(),
            params,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Arc<Value>,
    stored_at: Instant,
}

/// Memoized response bodies guarded by a single mutex.
pub struct ResponseCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    ttl: Option<Duration>,
}

impl ResponseCache {
    /// Create a cache. `ttl == None` keeps entries for the process lifetime.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(LruCache::unbounded()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a key as of `now`. Expired entries are dropped and reported as misses.
    pub fn get(&self, key: &CacheKey, now: Instant) -> Option<Arc<Value>> {
        let mut entries = self.lock();
        let entry = entries.get(key)?;

        if let Some(ttl) = self.ttl {
            if now.saturating_duration_since(entry.stored_at) >= ttl {
                entries.pop(key);
                return None;
            }
        }

        Some(Arc::clone(&entry.value))
    }

    pub fn put(&self, key: CacheKey, value: Arc<Value>, now: Instant) {
        self.lock().put(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(None)
    }
}
