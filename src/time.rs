//! Time abstraction for cache expiry.
//!
//! The cache never reads the time directly; it asks a [`Clock`]. Time is
//! monotonic ([`tokio::time::Instant`]), so wall-clock jumps cannot stretch
//! or shorten a TTL, and paused Tokio test time drives expiry too.
//! Production code uses [`MonotonicClock`], unit tests drive a [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::Instant;

/// Source of monotonic time.
///
/// # Example
///
/// ```
/// use cfgprobe::time::{Clock, MonotonicClock};
///
/// let clock = MonotonicClock;
/// let start = clock.now();
/// assert!(clock.elapsed_since(start) < std::time::Duration::from_secs(60));
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Production clock backed by [`Instant::now()`].
///
/// Follows Tokio's clock, so it stands still under `start_paused` tests
/// until time is advanced.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Holds a fixed origin plus an atomic millisecond offset, so it can be
/// shared behind an `Arc` and advanced from a test while the cache reads it.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    millis: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen `start` after an arbitrary origin.
    #[must_use]
    pub fn starting_at(start: Duration) -> Self {
        Self {
            origin: Instant::now(),
            millis: AtomicU64::new(duration_millis(start)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(duration_millis(by), Ordering::SeqCst);
    }

    /// Time since the origin.
    #[must_use]
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(Duration::ZERO)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
