//! Extraction engine.
//!
//! [`Engine::extract`] races every strategy that claims an app and returns
//! the first success, caching it so repeated calls share one [`Config`].
//!
//! # Flow
//!
//! 1. Normalize the app name (trim, lowercase, alias table).
//! 2. Serve from cache when fresh.
//! 3. Spawn one task per applicable strategy, at most
//!    [`MAX_PARALLEL_STRATEGIES`] running at once.
//! 4. The first `Ok` wins even if a higher-priority strategy is still
//!    running. Losing tasks are aborted when the call returns.

mod batch;
mod error;

#[cfg(test)]
mod batch_tests;
#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use batch::BatchReport;
pub use error::ExtractError;

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::cache::ConfigCache;
use crate::schema::Config;
use crate::strategy::{Catalog, Strategy, StrategyError};

/// Per-call limit when the caller gives none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Batch worker count.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Strategies allowed to run at once within a single extraction.
pub const MAX_PARALLEL_STRATEGIES: usize = 5;

/// Cache entries kept.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Cache entry lifetime.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Stand-in deadline distance for timeouts too large to add to an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Reported by [`Engine::supported_apps`] when no strategy declares any.
pub const FALLBACK_APPS: &[&str] = &[
    "alacritty",
    "ghostty",
    "git",
    "neovim",
    "tmux",
    "wezterm",
    "zed",
];

type Attempt = (String, Result<Config, StrategyError>);

/// Races strategies and caches winners.
///
/// Cloning is cheap; clones share strategies and cache.
#[derive(Clone)]
pub struct Engine {
    strategies: Arc<[Arc<dyn Strategy>]>,
    cache: Arc<ConfigCache>,
    aliases: Arc<BTreeMap<String, String>>,
    timeout: Duration,
    concurrency: usize,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("Engine")
            .field("strategies", &names)
            .field("timeout", &self.timeout)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Starts an engine with default limits and no strategies.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Extracts `app` within the engine timeout.
    ///
    /// # Errors
    ///
    /// See [`Engine::extract_until`].
    pub async fn extract(&self, app: &str) -> Result<Arc<Config>, ExtractError> {
        self.extract_until(app, deadline_after(self.timeout)).await
    }

    /// Extracts `app`, giving up at the earlier of `deadline` and the engine timeout.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Unsupported`] when no strategy claims the app
    /// - [`ExtractError::AllFailed`] with the last strategy error
    /// - [`ExtractError::DeadlineExceeded`] when time runs out first
    pub async fn extract_until(
        &self,
        app: &str,
        deadline: Instant,
    ) -> Result<Arc<Config>, ExtractError> {
        let app = self.canonical_name(app);
        let deadline = deadline.min(deadline_after(self.timeout));

        let key = cache_key(&app);
        if let Some(config) = self.cache.get(&key) {
            tracing::debug!(app = %app, "Serving cached config");
            return Ok(config);
        }

        let applicable: Vec<Arc<dyn Strategy>> = self
            .strategies
            .iter()
            .filter(|s| s.can_extract(&app))
            .cloned()
            .collect();
        if applicable.is_empty() {
            return Err(ExtractError::Unsupported { app });
        }

        let (mut tasks, rx) = spawn_attempts(applicable, &app, deadline);
        let config = drain(rx, &app, deadline).await;
        // Losers are aborted rather than left running
        tasks.abort_all();

        let config = Arc::new(config?);
        self.cache.set(key, Arc::clone(&config));
        Ok(config)
    }

    /// Apps any registered strategy declares, sorted and deduplicated.
    ///
    /// Falls back to [`FALLBACK_APPS`] when none are declared.
    #[must_use]
    pub fn supported_apps(&self) -> Vec<String> {
        let mut apps: Vec<String> = self.strategies.iter().flat_map(|s| s.apps()).collect();
        if apps.is_empty() {
            return FALLBACK_APPS.iter().map(ToString::to_string).collect();
        }
        apps.sort();
        apps.dedup();
        apps
    }

    /// Sweeps expired cache entries, returning how many were removed.
    pub fn clear_cache(&self) -> usize {
        self.cache.clear()
    }

    /// The shared result cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<ConfigCache> {
        &self.cache
    }

    /// Registered strategy names in priority order.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Trims, lowercases and resolves aliases.
    #[must_use]
    pub fn canonical_name(&self, app: &str) -> String {
        let name = app.trim().to_lowercase();
        self.aliases.get(&name).cloned().unwrap_or(name)
    }

    /// Per-call limit.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Batch worker count.
    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }
}

/// `now + timeout`, or [`FAR_FUTURE`] from now when that overflows.
pub(crate) fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

fn cache_key(app: &str) -> String {
    format!("config:{app}")
}

fn spawn_attempts(
    strategies: Vec<Arc<dyn Strategy>>,
    app: &str,
    deadline: Instant,
) -> (JoinSet<()>, mpsc::Receiver<Attempt>) {
    let permits = Arc::new(Semaphore::new(strategies.len().min(MAX_PARALLEL_STRATEGIES)));
    let (tx, rx) = mpsc::channel(strategies.len());
    let mut tasks = JoinSet::new();

    for strategy in strategies {
        let tx = tx.clone();
        let permits = Arc::clone(&permits);
        let app = app.to_string();
        tasks.spawn(async move {
            let result = attempt(strategy.as_ref(), &app, &permits, deadline).await;
            // The receiver is gone once a winner was picked
            let _ = tx.send((strategy.name().to_string(), result)).await;
        });
    }

    (tasks, rx)
}

async fn attempt(
    strategy: &dyn Strategy,
    app: &str,
    permits: &Semaphore,
    deadline: Instant,
) -> Result<Config, StrategyError> {
    let cancelled = || StrategyError::Cancelled {
        strategy: strategy.name().to_string(),
    };

    let Ok(Ok(_permit)) = tokio::time::timeout_at(deadline, permits.acquire()).await else {
        return Err(cancelled());
    };
    if Instant::now() >= deadline {
        return Err(cancelled());
    }

    tracing::debug!(app, strategy = strategy.name(), "Trying strategy");
    tokio::time::timeout_at(deadline, strategy.extract(app))
        .await
        .unwrap_or_else(|_| Err(cancelled()))
}

async fn drain(
    mut rx: mpsc::Receiver<Attempt>,
    app: &str,
    deadline: Instant,
) -> Result<Config, ExtractError> {
    let mut last_failure = None;

    loop {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Err(_) | Ok(None) => break,
            Ok(Some((strategy, Ok(config)))) => {
                tracing::info!(
                    app,
                    strategy = %strategy,
                    settings = config.len(),
                    "Extraction succeeded"
                );
                return Ok(config);
            }
            Ok(Some((strategy, Err(e)))) => {
                tracing::warn!(app, strategy = %strategy, error = %e, "Strategy failed");
                last_failure = Some((strategy, e));
            }
        }
    }

    let app = app.to_string();
    if Instant::now() >= deadline {
        return Err(ExtractError::DeadlineExceeded { app });
    }
    Err(match last_failure {
        Some((strategy, source)) => ExtractError::AllFailed {
            app,
            strategy,
            source,
        },
        None => ExtractError::Interrupted { app },
    })
}

/// Configures an [`Engine`].
pub struct EngineBuilder {
    strategies: Vec<Arc<dyn Strategy>>,
    cache: Option<Arc<ConfigCache>>,
    aliases: BTreeMap<String, String>,
    timeout: Duration,
    concurrency: usize,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            strategies: Vec::new(),
            cache: None,
            aliases: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl EngineBuilder {
    /// Registers a strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Uses `cache` instead of a fresh default one.
    #[must_use]
    pub fn cache(mut self, cache: Arc<ConfigCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Takes app aliases from `catalog`.
    #[must_use]
    pub fn catalog(mut self, catalog: &Catalog) -> Self {
        self.aliases.clone_from(&catalog.aliases);
        self
    }

    /// Sets the per-call limit. Zero is ignored.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    /// Sets the batch worker count. Zero is ignored.
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        if concurrency > 0 {
            self.concurrency = concurrency;
        }
        self
    }

    /// Builds the engine, ordering strategies by descending priority.
    #[must_use]
    pub fn build(mut self) -> Engine {
        // Stable: equal priorities keep registration order
        self.strategies.sort_by_key(|s| Reverse(s.priority()));

        Engine {
            strategies: self.strategies.into(),
            cache: self.cache.unwrap_or_else(|| {
                Arc::new(ConfigCache::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL))
            }),
            aliases: Arc::new(self.aliases),
            timeout: self.timeout,
            concurrency: self.concurrency,
        }
    }
}
