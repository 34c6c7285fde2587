//! Error types for the extraction engine.

use thiserror::Error;

use crate::strategy::StrategyError;

/// Why an extraction produced no config.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No registered strategy handles this app.
    #[error("No extraction strategy supports {app}")]
    Unsupported {
        /// Normalized app name
        app: String,
    },

    /// Every applicable strategy failed.
    ///
    /// Carries the last failure to arrive.
    #[error("All extraction strategies failed for {app} (last: {strategy}): {source}")]
    AllFailed {
        /// Normalized app name
        app: String,
        /// Strategy that produced `source`
        strategy: String,
        /// Last strategy error
        #[source]
        source: StrategyError,
    },

    /// The deadline passed before any strategy succeeded.
    #[error("Extraction of {app} exceeded its deadline")]
    DeadlineExceeded {
        /// Normalized app name
        app: String,
    },

    /// Every strategy task ended without reporting a result.
    #[error("Extraction of {app} was interrupted")]
    Interrupted {
        /// Normalized app name
        app: String,
    },
}

impl ExtractError {
    /// The normalized app name this error is about.
    #[must_use]
    pub fn app(&self) -> &str {
        match self {
            Self::Unsupported { app }
            | Self::AllFailed { app, .. }
            | Self::DeadlineExceeded { app }
            | Self::Interrupted { app } => app,
        }
    }
}
