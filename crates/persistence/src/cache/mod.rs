//! In-memory cache of per-user page data
//!
//! Entries are keyed by `(route, key)`, where the key names one user's piece
//! of the page, so a mutation can drop everything cached for a route in one
//! call.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

type CacheKey = (String, String);

/// Cached item with expiration
struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

/// Thread-safe page data cache with TTL and max-entry bounds
pub struct PageCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry<Value>>>,
    default_ttl: Duration,
    max_entries: usize,
}

impl PageCache {
    /// Create a new cache with default TTL and max entry count
    pub fn with_capacity(default_ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            max_entries,
        }
    }

    pub fn new(default_ttl: Duration) -> Self {
        Self::with_capacity(default_ttl, 1000)
    }

    /// Get cached data for a route and key if not expired
    pub fn get(&self, route: &str, key: &str) -> Option<Value> {
        let cache = self.entries.read().ok()?;
        let entry = cache.get(&(route.to_string(), key.to_string()))?;

        if entry.is_expired() {
            None
        } else {
            Some(entry.value.clone())
        }
    }

    /// Insert or update cached data.
    /// Evicts expired entries, then the oldest one, when at capacity.
    pub fn insert(&self, route: &str, key: &str, value: Value) {
        if let Ok(mut cache) = self.entries.write() {
            if cache.len() >= self.max_entries {
                cache.retain(|_, entry| !entry.is_expired());
            }

            if cache.len() >= self.max_entries {
                if let Some(oldest_key) = cache
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    cache.remove(&oldest_key);
                }
            }

            cache.insert(
                (route.to_string(), key.to_string()),
                CacheEntry {
                    value,
                    inserted_at: Instant::now(),
                    ttl: self.default_ttl,
                },
            );
        }
    }

    /// Drop every entry cached under a route
    pub fn invalidate(&self, route: &str) {
        if let Ok(mut cache) = self.entries.write() {
            let before = cache.len();
            cache.retain(|(cached_route, _), _| cached_route != route);
            debug!("Invalidated {} cached entries for {}", before - cache.len(), route);
        }
    }

    /// Clear all expired entries
    pub fn cleanup(&self) {
        if let Ok(mut cache) = self.entries.write() {
            cache.retain(|_, entry| !entry.is_expired());
        }
    }

    /// Clear entire cache
    pub fn clear(&self) {
        if let Ok(mut cache) = self.entries.write() {
            cache.clear();
        }
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.entries.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PageCache {
    fn default() -> Self {
        // 60 second TTL, max 1000 entries
        Self::with_capacity(Duration::from_secs(60), 1000)
    }
}
