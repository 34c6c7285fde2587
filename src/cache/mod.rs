//! Extraction result cache with per-entry TTL and LRU eviction.
//!
//! # Semantics
//!
//! - [`ConfigCache::get`] never returns an entry older than its TTL. An
//!   expired entry found on lookup is evicted and reported as a miss.
//! - [`ConfigCache::set`] replaces the whole entry and restarts its TTL.
//!   Inserting a new key at capacity evicts the least recently *accessed*
//!   key, since a hit refreshes recency.
//! - [`ConfigCache::clear`] only sweeps expired entries. There is no
//!   delete-by-key and no partial update.
//!
//! One mutex guards the map, the recency list and the [`CacheStats`]
//! counters; `get` mutates recency so reads are exclusive too.

mod lru;
mod stats;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use lru::RecencyMap;
pub use stats::CacheStats;

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::schema::Config;
use crate::time::{Clock, MonotonicClock};
use stats::Counters;

#[derive(Debug, Clone)]
struct Entry {
    config: Arc<Config>,
    inserted_at: Instant,
    ttl: Duration,
}

#[derive(Debug)]
struct Store {
    entries: RecencyMap<Entry>,
    counters: Counters,
}

/// Thread-safe TTL + LRU cache of extracted configs.
///
/// # Type Parameters
///
/// - `C`: time source for expiry (defaults to [`MonotonicClock`])
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use std::time::Duration;
///
/// use cfgprobe::cache::ConfigCache;
/// use cfgprobe::schema::{Config, Format};
///
/// let cache = ConfigCache::new(NonZeroUsize::new(10).unwrap(), Duration::from_secs(60));
/// cache.set("config:tmux", Config::new("tmux", Format::Custom));
/// assert!(cache.get("config:tmux").is_some());
/// ```
#[derive(Debug)]
pub struct ConfigCache<C = MonotonicClock> {
    store: Mutex<Store>,
    default_ttl: Duration,
    clock: C,
}

impl ConfigCache<MonotonicClock> {
    /// Creates a cache using the monotonic clock.
    #[must_use]
    pub fn new(capacity: NonZeroUsize, default_ttl: Duration) -> Self {
        Self::with_clock(capacity, default_ttl, MonotonicClock)
    }
}

impl<C: Clock> ConfigCache<C> {
    /// Creates a cache reading time from `clock`.
    #[must_use]
    pub fn with_clock(capacity: NonZeroUsize, default_ttl: Duration, clock: C) -> Self {
        Self {
            store: Mutex::new(Store {
                entries: RecencyMap::new(capacity),
                counters: Counters::default(),
            }),
            default_ttl,
            clock,
        }
    }

    /// Looks up `key`, refreshing its recency on a hit.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<Config>> {
        let mut store = self.lock();

        let Some(entry) = store.entries.peek(key) else {
            store.counters.misses += 1;
            return None;
        };
        if self.is_expired(entry) {
            store.entries.remove(key);
            store.counters.expirations += 1;
            store.counters.misses += 1;
            tracing::debug!(key, "Cache entry expired");
            return None;
        }

        let config = Arc::clone(&entry.config);
        store.entries.touch(key);
        store.counters.hits += 1;
        Some(config)
    }

    /// Stores `config` under `key` with the default TTL.
    pub fn set(&self, key: impl Into<String>, config: impl Into<Arc<Config>>) {
        self.set_with_ttl(key, config, self.default_ttl);
    }

    /// Stores `config` under `key` with an explicit TTL.
    pub fn set_with_ttl(
        &self,
        key: impl Into<String>,
        config: impl Into<Arc<Config>>,
        ttl: Duration,
    ) {
        let entry = Entry {
            config: config.into(),
            inserted_at: self.clock.now(),
            ttl,
        };

        let mut store = self.lock();
        store.counters.inserts += 1;
        if let Some(evicted) = store.entries.insert(key.into(), entry) {
            store.counters.evictions += 1;
            tracing::debug!(key = %evicted, "Evicted least recently used cache entry");
        }
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn clear(&self) -> usize {
        let mut store = self.lock();
        let expired = store.entries.keys_where(|entry| self.is_expired(entry));
        for key in &expired {
            store.entries.remove(key);
        }
        store.counters.expirations += expired.len() as u64;
        expired.len()
    }

    /// Number of entries, including any that have expired but not yet been swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns true if no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().entries.capacity()
    }

    /// Current size plus activity counters since creation.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let store = self.lock();
        store
            .counters
            .snapshot(store.entries.len(), store.entries.capacity())
    }

    /// TTL applied by [`ConfigCache::set`].
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        self.clock.elapsed_since(entry.inserted_at) > entry.ttl
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + 'static> ConfigCache<C> {
    /// Sweeps expired entries every `interval` until the handle is aborted.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = cache.clear();
                if removed > 0 {
                    tracing::debug!(removed, "Swept expired cache entries");
                }
            }
        })
    }
}
