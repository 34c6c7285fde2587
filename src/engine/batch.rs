//! Bounded-concurrency extraction of many apps.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinSet;
use tokio::time::Instant;

use super::{Engine, ExtractError, deadline_after};
use crate::schema::Config;

/// Outcome of [`Engine::extract_batch_report`], keyed by the app name as given.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successful extractions
    pub configs: HashMap<String, Arc<Config>>,
    /// Failed extractions
    pub errors: HashMap<String, ExtractError>,
}

impl BatchReport {
    /// Number of apps processed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len() + self.errors.len()
    }

    /// Returns true if no apps were processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty() && self.errors.is_empty()
    }

    fn merge(&mut self, other: Self) {
        self.configs.extend(other.configs);
        self.errors.extend(other.errors);
    }
}

impl Engine {
    /// Extracts every app, returning only the successes.
    ///
    /// Failures are logged and dropped; see [`Engine::extract_batch_report`].
    pub async fn extract_batch<S: AsRef<str>>(&self, apps: &[S]) -> HashMap<String, Arc<Config>> {
        self.extract_batch_report(apps).await.configs
    }

    /// Extracts every app with at most [`Engine::concurrency`] in flight.
    ///
    /// All apps share one deadline of the engine timeout from now. Never
    /// fails; per-app errors land in [`BatchReport::errors`].
    pub async fn extract_batch_report<S: AsRef<str>>(&self, apps: &[S]) -> BatchReport {
        let queue: VecDeque<String> = apps.iter().map(|a| a.as_ref().to_string()).collect();
        let workers = self.concurrency.min(queue.len());
        let queue = Arc::new(Mutex::new(queue));
        let deadline = deadline_after(self.timeout);

        let mut pool = JoinSet::new();
        for _ in 0..workers {
            pool.spawn(self.clone().work(Arc::clone(&queue), deadline));
        }

        let mut report = BatchReport::default();
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(partial) => report.merge(partial),
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => tracing::warn!(error = %e, "Batch worker cancelled"),
            }
        }

        tracing::info!(
            succeeded = report.configs.len(),
            failed = report.errors.len(),
            "Batch extraction finished"
        );
        report
    }

    async fn work(self, queue: Arc<Mutex<VecDeque<String>>>, deadline: Instant) -> BatchReport {
        let mut report = BatchReport::default();

        while let Some(app) = next_app(&queue) {
            match self.extract_until(&app, deadline).await {
                Ok(config) => {
                    report.configs.insert(app, config);
                }
                Err(e) => {
                    tracing::warn!(app = %app, error = %e, "Batch extraction failed");
                    report.errors.insert(app, e);
                }
            }
        }

        report
    }
}

fn next_app(queue: &Mutex<VecDeque<String>>) -> Option<String> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}
