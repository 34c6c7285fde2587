//! Extraction by running the application's own introspection command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{Catalog, CliCommand, Strategy, StrategyError};
use crate::runner::{CommandRunner, TokioRunner};
use crate::schema::{Config, ExtractionSource};

const NAME: &str = "cli";

/// File marking the project root; the substitute search goes no higher.
const PROJECT_MARKER: &str = "Cargo.toml";

/// Runs each app's introspection command and parses its output.
///
/// # Type Parameters
///
/// - `R`: command runner (defaults to [`TokioRunner`])
#[derive(Debug)]
pub struct CliStrategy<R = TokioRunner> {
    runner: R,
    commands: BTreeMap<String, CliCommand>,
    config_paths: BTreeMap<String, String>,
    search_root: Option<PathBuf>,
}

impl CliStrategy<TokioRunner> {
    /// Creates a strategy that spawns real processes.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_runner(catalog, TokioRunner::new())
    }
}

impl<R: CommandRunner> CliStrategy<R> {
    /// Creates a strategy using a custom runner.
    #[must_use]
    pub fn with_runner(catalog: &Catalog, runner: R) -> Self {
        Self {
            runner,
            commands: catalog.commands.clone(),
            config_paths: catalog.config_paths.clone(),
            search_root: None,
        }
    }

    /// Starts the substitute-binary search from `dir` instead of the working directory.
    #[must_use]
    pub fn with_search_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_root = Some(dir.into());
        self
    }

    /// The program to actually run for `command`.
    ///
    /// Commands found on `PATH` run as-is. Otherwise a repository-local
    /// substitute is looked for; failing that, the bare name is returned and
    /// the runner reports the spawn failure.
    fn resolve(&self, command: &str) -> String {
        if is_on_path(command) {
            return command.to_string();
        }

        let root = self
            .search_root
            .clone()
            .or_else(|| std::env::current_dir().ok());

        root.and_then(|dir| resolve_substitute(&dir, command))
            .map_or_else(|| command.to_string(), |p| p.display().to_string())
    }
}

#[async_trait]
impl<R: CommandRunner> Strategy for CliStrategy<R> {
    fn name(&self) -> &str {
        NAME
    }

    fn can_extract(&self, app: &str) -> bool {
        self.commands.contains_key(app)
    }

    fn priority(&self) -> i32 {
        100
    }

    async fn extract(&self, app: &str) -> Result<Config, StrategyError> {
        let cmd = self
            .commands
            .get(app)
            .ok_or_else(|| StrategyError::NotConfigured {
                strategy: NAME,
                app: app.to_string(),
            })?;

        let program = self.resolve(&cmd.command);
        tracing::debug!(app, program = %program, "Running introspection command");

        let output = self.runner.run(&program, &cmd.args, cmd.timeout).await?;

        let location = cmd.location();
        let mut config = cmd
            .parser
            .parse(app, &output.combined())
            .ok_or_else(|| StrategyError::Parse {
                location: location.clone(),
            })?;

        if let Some(path) = self.config_paths.get(app) {
            config = config.with_config_path(path.as_str());
        }
        Ok(config.with_source(ExtractionSource::new(NAME, location, cmd.confidence)))
    }

    fn apps(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }
}

/// Relative locations checked in each directory for a stand-in executable.
fn substitute_candidates(command: &str) -> [PathBuf; 6] {
    let rpc = format!("{command}-rpc");
    let script = format!("{command}.sh");
    [
        Path::new("testdata/bin").join(command),
        Path::new("testdata/bin").join(&script),
        Path::new("tools/plugins").join(command),
        Path::new("tools/plugins").join(&script),
        Path::new("tools/plugins").join(&rpc).join(command),
        Path::new("tools/plugins").join(&rpc).join(&script),
    ]
}

/// Walks from `start` toward the filesystem root looking for a stand-in for
/// `command`.
///
/// The walk stops at the first hit, or after checking a directory that
/// contains `Cargo.toml`.
#[must_use]
pub fn resolve_substitute(start: &Path, command: &str) -> Option<PathBuf> {
    let candidates = substitute_candidates(command);

    for dir in start.ancestors() {
        if let Some(found) = candidates
            .iter()
            .map(|rel| dir.join(rel))
            .find(|path| path.is_file())
        {
            return Some(found);
        }
        if dir.join(PROJECT_MARKER).exists() {
            break;
        }
    }
    None
}

fn is_on_path(command: &str) -> bool {
    let direct = Path::new(command);
    if direct.components().count() > 1 {
        return direct.is_file();
    }

    std::env::var_os("PATH").is_some_and(|paths| {
        std::env::split_paths(&paths).any(|dir| {
            let candidate = dir.join(command);
            candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
        })
    })
}
