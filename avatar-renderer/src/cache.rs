//! Bounded render cache.
//!
//! Entries are evicted in insertion order: when an insert pushes the entry
//! count past `max_entries`, the oldest inserted entry is dropped. Reads do
//! not refresh an entry's position, so this is a FIFO cache rather than an
//! LRU one. Entries are never mutated and never expire.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

/// Default maximum number of cached renders.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Configuration for the render cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries kept resident.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of evictions.
    pub evictions: u64,
    /// Number of successful loader invocations.
    pub loads: u64,
}

/// Insertion-ordered bounded cache keyed by string.
#[derive(Debug)]
pub struct FifoCache<V> {
    entries: HashMap<String, V>,
    order: VecDeque<String>,
    config: CacheConfig,
    stats: CacheStats,
}

impl<V: Clone> FifoCache<V> {
    /// Create a cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a cache with custom configuration.
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::with_capacity(config.max_entries.min(1024)),
            order: VecDeque::with_capacity(config.max_entries.min(1024)),
            config,
            stats: CacheStats::default(),
        }
    }

    /// Look up an entry, counting a hit or miss.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if let Some(value) = self.entries.get(key) {
            self.stats.hits += 1;
            Some(value)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Look up an entry without touching statistics.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Insert an entry, evicting the oldest if the bound is exceeded.
    ///
    /// Inserting a key that is already resident keeps the existing value and
    /// its position; all values for one key are expected to be identical.
    pub fn insert(&mut self, key: String, value: V) {
        if self.entries.contains_key(&key) {
            tracing::trace!(key = %key, "cache insert for resident key ignored");
            return;
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);

        while self.entries.len() > self.config.max_entries {
            self.evict_oldest();
        }
    }

    /// Return the cached value for `key`, or run `loader` and cache its result.
    ///
    /// A loader error is returned unchanged and nothing is stored.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error.
    pub fn get_or_try_insert_with<F, E>(&mut self, key: &str, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            tracing::debug!(key, "cache hit");
            return Ok(value.clone());
        }

        tracing::debug!(key, "cache miss");
        let value = loader()?;
        self.stats.loads += 1;
        self.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let value = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(value)
    }

    /// Check if a key is cached.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Clear all entries. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys from oldest to newest insertion.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Cache configuration.
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Cache statistics.
    #[must_use]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn evict_oldest(&mut self) {
        if let Some(key) = self.order.pop_front() {
            if self.entries.remove(&key).is_some() {
                self.stats.evictions += 1;
                tracing::debug!(key = %key, "cache eviction");
            }
        }
    }
}

impl<V: Clone> Default for FifoCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe cache wrapper.
pub mod sync {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, RwLock};

    use super::{CacheConfig, CacheStats, FifoCache};
    use crate::error::{RenderError, RenderResult};

    /// Shared render cache.
    ///
    /// Clones share the same underlying cache. A missed key is loaded while
    /// holding the write lock, after re-checking for a concurrent insert, so
    /// each key is loaded at most once even under contention. Hits served
    /// under the read lock are counted atomically.
    #[derive(Debug)]
    pub struct SharedCache<V> {
        inner: Arc<RwLock<FifoCache<V>>>,
        read_hits: Arc<AtomicU64>,
    }

    impl<V> Clone for SharedCache<V> {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
                read_hits: Arc::clone(&self.read_hits),
            }
        }
    }

    impl<V: Clone> SharedCache<V> {
        /// Create a new shared cache with the default capacity.
        #[must_use]
        pub fn new() -> Self {
            Self::with_config(CacheConfig::default())
        }

        /// Create with custom configuration.
        #[must_use]
        pub fn with_config(config: CacheConfig) -> Self {
            Self {
                inner: Arc::new(RwLock::new(FifoCache::with_config(config))),
                read_hits: Arc::new(AtomicU64::new(0)),
            }
        }

        /// Return the cached value for `key`, or load and cache it.
        ///
        /// # Errors
        ///
        /// Propagates the loader's error, or [`RenderError::LockPoisoned`].
        pub fn get_or_try_insert_with<F>(&self, key: &str, loader: F) -> RenderResult<V>
        where
            F: FnOnce() -> RenderResult<V>,
        {
            if let Some(value) = self.get(key)? {
                tracing::debug!(key, "cache hit");
                return Ok(value);
            }

            let mut cache = self.inner.write().map_err(|_| poisoned())?;
            cache.get_or_try_insert_with(key, loader)
        }

        /// Get a cloned value from the cache, counting a hit when present.
        ///
        /// Misses are not counted here; they are counted once by the loading
        /// path.
        ///
        /// # Errors
        ///
        /// Returns [`RenderError::LockPoisoned`] if the lock was poisoned.
        pub fn get(&self, key: &str) -> RenderResult<Option<V>> {
            let hit = self.inner.read().map_err(|_| poisoned())?.peek(key).cloned();
            if hit.is_some() {
                self.read_hits.fetch_add(1, Ordering::Relaxed);
            }
            Ok(hit)
        }

        /// Check if a key is cached (`false` if the lock is poisoned).
        #[must_use]
        pub fn contains(&self, key: &str) -> bool {
            self.inner
                .read()
                .map_err(|_| poisoned())
                .map(|cache| cache.contains(key))
                .unwrap_or(false)
        }

        /// Current number of entries (0 if the lock is poisoned).
        #[must_use]
        pub fn len(&self) -> usize {
            self.inner
                .read()
                .map_err(|_| poisoned())
                .map(|cache| cache.len())
                .unwrap_or(0)
        }

        /// Check if the cache is empty.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Clear all entries.
        ///
        /// # Errors
        ///
        /// Returns [`RenderError::LockPoisoned`] if the lock was poisoned.
        pub fn clear(&self) -> RenderResult<()> {
            self.inner.write().map_err(|_| poisoned())?.clear();
            Ok(())
        }

        /// Snapshot of cache statistics, or `None` if the lock is poisoned.
        #[must_use]
        pub fn stats(&self) -> Option<CacheStats> {
            let cache = self.inner.read().map_err(|_| poisoned()).ok()?;
            let mut stats = *cache.stats();
            stats.hits += self.read_hits.load(Ordering::Relaxed);
            Some(stats)
        }
    }

    impl<V: Clone> Default for SharedCache<V> {
        fn default() -> Self {
            Self::new()
        }
    }

    fn poisoned() -> RenderError {
        tracing::warn!("render cache lock poisoned");
        RenderError::LockPoisoned
    }
}
