//! Error types for command execution.

use std::time::Duration;

use thiserror::Error;

/// Why a command did not produce usable output.
#[derive(Debug, Error)]
pub enum RunError {
    /// The program could not be started, or its output could not be collected.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program name or path
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    #[error("{program} exited with status {code:?}: {stderr}")]
    NonZeroExit {
        /// Program name or path
        program: String,
        /// Exit code, if any
        code: Option<i32>,
        /// Trimmed standard error
        stderr: String,
    },

    /// The program did not finish in time and was killed.
    #[error("{program} timed out after {timeout:?}")]
    Timeout {
        /// Program name or path
        program: String,
        /// The limit that was exceeded
        timeout: Duration,
    },
}
