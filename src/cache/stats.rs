//! Cache counters.

use serde::Serialize;

/// Snapshot of cache activity since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored, including expired ones not yet swept
    pub size: usize,

    /// Maximum number of entries
    pub capacity: usize,

    /// Lookups that returned a fresh entry
    pub hits: u64,

    /// Lookups that found nothing or an expired entry
    pub misses: u64,

    /// Insert and replace operations
    pub inserts: u64,

    /// Entries dropped to make room for a new key
    pub evictions: u64,

    /// Entries removed because their TTL passed
    pub expirations: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, or 0.0 before any lookup.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Running totals kept under the cache lock.
#[derive(Debug, Default)]
pub(super) struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl Counters {
    pub(super) const fn snapshot(&self, size: usize, capacity: usize) -> CacheStats {
        CacheStats {
            size,
            capacity,
            hits: self.hits,
            misses: self.misses,
            inserts: self.inserts,
            evictions: self.evictions,
            expirations: self.expirations,
        }
    }
}
