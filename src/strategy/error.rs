//! Error type shared by all strategies.

use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::HttpError;
use crate::runner::RunError;

/// Why one strategy failed to produce a config.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The strategy has no entry for this app.
    #[error("No {strategy} source configured for {app}")]
    NotConfigured {
        /// Strategy name
        strategy: &'static str,
        /// Requested app
        app: String,
    },

    /// The introspection command failed.
    #[error("Command failed: {0}")]
    Command(#[from] RunError),

    /// The HTTP request could not be completed.
    #[error("Request failed: {0}")]
    Http(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// Response status
        status: http::StatusCode,
    },

    /// The source was read but yielded no settings.
    #[error("No settings found in {location}")]
    Parse {
        /// Command line, repository path or file that was parsed
        location: String,
    },

    /// None of the candidate locations exist.
    #[error("No {strategy} source found for {app}")]
    NotFound {
        /// Strategy name
        strategy: &'static str,
        /// Requested app
        app: String,
    },

    /// A local file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The deadline passed before the strategy started.
    #[error("Deadline passed before {strategy} could run")]
    Cancelled {
        /// Strategy name
        strategy: String,
    },
}
