//! External command execution.
//!
//! The CLI strategy never touches `std::process` directly; it goes through a
//! [`CommandRunner`], so tests can script program output and timing.

mod error;
mod tokio_runner;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::RunError;
pub use tokio_runner::TokioRunner;

use std::time::Duration;

/// Captured output of a successful (zero exit) command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl RunOutput {
    /// Creates output from stdout and stderr text.
    #[must_use]
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Stdout and stderr joined by a newline. Empty streams are skipped.
    ///
    /// Several tools print their documentation on stderr, so parsers see both.
    #[must_use]
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }
}

/// Runs an external program to completion.
///
/// Implementations must stop waiting once `timeout` elapses, and must not
/// leave the child running when the returned future is dropped.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] when:
    /// - The program cannot be started ([`RunError::Spawn`])
    /// - It exits with a non-zero status ([`RunError::NonZeroExit`])
    /// - It does not finish within `timeout` ([`RunError::Timeout`])
    fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<RunOutput, RunError>> + Send;
}

impl<T: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<T> {
    fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<RunOutput, RunError>> + Send {
        (**self).run(program, args, timeout)
    }
}
