//! Default values for configuration options.
//!
//! Engine and cache limits mirror the library defaults in [`crate::engine`].

use std::time::Duration;

use crate::engine;

/// Default per-extraction timeout in seconds.
pub const TIMEOUT_SECS: u64 = engine::DEFAULT_TIMEOUT.as_secs();

/// Default number of batch workers.
pub const CONCURRENCY: usize = engine::DEFAULT_CONCURRENCY;

/// Default number of cached configs.
pub const CACHE_CAPACITY: usize = engine::DEFAULT_CACHE_CAPACITY.get();

/// Default cache entry lifetime in seconds.
pub const CACHE_TTL_SECS: u64 = engine::DEFAULT_CACHE_TTL.as_secs();

/// Default interval between expired-entry sweeps in seconds.
pub const SWEEP_INTERVAL_SECS: u64 = 300;

/// Default directory searched by the local strategy.
pub const LOCAL_DIR: &str = "configs";

/// Default cap on downloaded file size.
pub const MAX_BODY_BYTES: usize = crate::fetch::DEFAULT_MAX_BODY_BYTES;

/// Default sweep interval as Duration.
#[must_use]
pub const fn sweep_interval() -> Duration {
    Duration::from_secs(SWEEP_INTERVAL_SECS)
}
