//! Tests for the TTL + LRU config cache.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use super::{CacheStats, ConfigCache};
use crate::schema::{Config, Format};
use crate::time::ManualClock;

fn config(app: &str) -> Config {
    Config::new(app, Format::Custom)
}

fn cache(capacity: usize, ttl_secs: u64) -> (ConfigCache<Arc<ManualClock>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_at(Duration::from_secs(1_000)));
    let cache = ConfigCache::with_clock(
        NonZeroUsize::new(capacity).unwrap(),
        Duration::from_secs(ttl_secs),
        Arc::clone(&clock),
    );
    (cache, clock)
}

mod ttl {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let (cache, clock) = cache(4, 60);
        cache.set("a", config("a"));

        clock.advance(Duration::from_secs(60));

        assert_eq!(cache.get("a").unwrap().app, "a");
    }

    #[test]
    fn miss_strictly_after_ttl_without_clear() {
        let (cache, clock) = cache(4, 60);
        cache.set("a", config("a"));

        clock.advance(Duration::from_millis(60_001));

        assert!(cache.get("a").is_none());
        // Lazily evicted on access
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn set_refreshes_ttl() {
        let (cache, clock) = cache(4, 60);
        cache.set("a", config("a"));
        clock.advance(Duration::from_secs(50));
        cache.set("a", config("a2"));
        clock.advance(Duration::from_secs(50));

        assert_eq!(cache.get("a").unwrap().app, "a2");
    }

    #[test]
    fn get_does_not_refresh_ttl() {
        let (cache, clock) = cache(4, 60);
        cache.set("a", config("a"));
        clock.advance(Duration::from_secs(40));
        assert!(cache.get("a").is_some());
        clock.advance(Duration::from_secs(40));

        assert!(cache.get("a").is_none());
    }

    #[test]
    fn per_entry_ttl_overrides_default() {
        let (cache, clock) = cache(4, 60);
        cache.set_with_ttl("short", config("short"), Duration::from_secs(5));
        cache.set("long", config("long"));

        clock.advance(Duration::from_secs(10));

        assert!(cache.get("short").is_none());
        assert!(cache.get("long").is_some());
    }

    #[test]
    fn clear_removes_only_expired_entries() {
        let (cache, clock) = cache(4, 60);
        cache.set_with_ttl("old", config("old"), Duration::from_secs(5));
        cache.set("fresh", config("fresh"));
        clock.advance(Duration::from_secs(10));

        assert_eq!(cache.clear(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("fresh").is_some());
    }
}

mod lru_eviction {
    use super::*;

    #[test]
    fn evicts_oldest_when_never_accessed() {
        let (cache, _clock) = cache(2, 60);
        cache.set("a", config("a"));
        cache.set("b", config("b"));
        cache.set("c", config("c"));

        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn get_refreshes_recency_so_least_recently_accessed_is_evicted() {
        let (cache, _clock) = cache(3, 60);
        cache.set("a", config("a"));
        cache.set("b", config("b"));
        cache.set("c", config("c"));

        // "a" was inserted first but is now the most recently accessed
        assert!(cache.get("a").is_some());
        cache.set("d", config("d"));

        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.get("d").is_some());
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn updating_existing_key_at_capacity_does_not_evict() {
        let (cache, _clock) = cache(2, 60);
        cache.set("a", config("a"));
        cache.set("b", config("b"));
        cache.set("a", config("a2"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_some());
    }
}

mod accessors {
    use super::*;

    #[test]
    fn get_returns_shared_instance() {
        let (cache, _clock) = cache(2, 60);
        cache.set("a", config("a"));

        let first = cache.get("a").unwrap();
        let second = cache.get("a").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn capacity_and_ttl_reported() {
        let (cache, _clock) = cache(7, 30);

        assert_eq!(cache.capacity(), 7);
        assert_eq!(cache.default_ttl(), Duration::from_secs(30));
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigCache>();
    }
}

mod stats {
    use super::*;

    #[test]
    fn counts_hits_misses_and_inserts() {
        let (cache, _clock) = cache(4, 60);
        cache.set("a", config("a"));
        cache.set("b", config("b"));

        assert!(cache.get("a").is_some());
        assert!(cache.get("a").is_some());
        assert!(cache.get("missing").is_none());

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 2);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_lru_evictions_but_not_replacements() {
        let (cache, _clock) = cache(2, 60);
        cache.set("a", config("a"));
        cache.set("b", config("b"));
        cache.set("b", config("b2"));
        cache.set("c", config("c"));

        let stats = cache.stats();
        assert_eq!(stats.inserts, 4);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.size, 2);
    }

    #[test]
    fn expired_lookup_counts_as_miss_and_expiration() {
        let (cache, clock) = cache(4, 60);
        cache.set("a", config("a"));
        clock.advance(Duration::from_secs(61));

        assert!(cache.get("a").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.size, 0);
    }

    #[test]
    fn clear_counts_swept_entries() {
        let (cache, clock) = cache(4, 60);
        cache.set_with_ttl("x", config("x"), Duration::from_secs(1));
        cache.set_with_ttl("y", config("y"), Duration::from_secs(1));
        cache.set("z", config("z"));
        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.stats().expirations, 2);
    }

    #[test]
    fn hit_rate_is_zero_before_any_lookup() {
        let (cache, _clock) = cache(4, 60);

        assert_eq!(cache.stats(), CacheStats {
            capacity: 4,
            ..CacheStats::default()
        });
        assert!(cache.stats().hit_rate().abs() < f64::EPSILON);
    }
}

mod monotonic_expiry {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn default_clock_expires_with_tokio_time() {
        let cache = ConfigCache::new(NonZeroUsize::new(4).unwrap(), Duration::from_secs(60));
        cache.set("a", config("a"));

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(cache.get("a").is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get("a").is_none());
    }
}

mod sweeper {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn periodic_sweep_removes_expired_entries() {
        let (cache, clock) = cache(4, 1);
        let cache = Arc::new(cache);
        cache.set("a", config("a"));
        clock.advance(Duration::from_secs(5));

        let handle = cache.spawn_sweeper(Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(11)).await;
        tokio::task::yield_now().await;

        assert_eq!(cache.len(), 0);
        handle.abort();
    }
}
