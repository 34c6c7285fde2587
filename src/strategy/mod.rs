//! Extraction strategies.
//!
//! Each strategy is one independent, imperfect way of learning an app's
//! configuration schema. The engine races every strategy that claims an app
//! and keeps the first success.
//!
//! | Strategy | Source | Priority | Confidence |
//! |---|---|---|---|
//! | [`CliStrategy`] | the program's own introspection command | 100 | per app |
//! | [`LocalStrategy`] | a materialized copy on disk | 75 | 0.85 |
//! | [`RepositoryStrategy`] | defaults in the public source repository | 50 | per app |
//! | [`BuiltinStrategy`] | hand-authored fallback | 10 | 0.60 |

mod builtin;
mod catalog;
mod cli;
mod error;
mod local;
mod repository;

#[cfg(test)]
mod local_tests;

pub use builtin::BuiltinStrategy;
pub use catalog::{Catalog, CliCommand, RepoSource};
pub use cli::{CliStrategy, resolve_substitute};
pub use error::StrategyError;
pub use local::{LOCAL_EXTENSIONS, LocalStrategy};
pub use repository::{RAW_CONTENT_BASE, RepositoryStrategy};

use async_trait::async_trait;

use crate::schema::Config;

/// One way of extracting an application's configuration schema.
///
/// Strategies are registered once and shared across concurrent
/// extractions, so implementations hold only read-only state.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Short identifier, also recorded as [`ExtractionSource::method`](crate::schema::ExtractionSource).
    fn name(&self) -> &str;

    /// Returns true if this strategy knows how to handle `app`.
    fn can_extract(&self, app: &str) -> bool;

    /// Higher runs earlier when concurrency is limited.
    fn priority(&self) -> i32;

    /// Extracts the configuration for `app`.
    ///
    /// The returned future may be dropped at any await point when the
    /// caller's deadline passes; implementations must not leave work
    /// running past that.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError`] describing why this source failed. Errors
    /// never affect other strategies.
    async fn extract(&self, app: &str) -> Result<Config, StrategyError>;

    /// Apps this strategy declares support for.
    fn apps(&self) -> Vec<String>;
}
