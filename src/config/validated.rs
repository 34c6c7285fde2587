//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the binary. All validation is performed during construction.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Repository strategy settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySettings {
    /// Whether the repository strategy is registered
    pub enabled: bool,

    /// Cap on downloaded file size
    pub max_body_bytes: usize,

    /// `User-Agent` override; `None` keeps the client default
    pub user_agent: Option<String>,
}

/// Fully validated configuration ready for use by the binary.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Per-extraction timeout
    pub timeout: Duration,

    /// Batch worker count
    pub concurrency: usize,

    /// Maximum number of cached configs
    pub cache_capacity: NonZeroUsize,

    /// Cache entry lifetime
    pub cache_ttl: Duration,

    /// Interval between expired-entry sweeps
    pub sweep_interval: Duration,

    /// Directory searched by the local strategy, with `~` expanded
    pub local_dir: PathBuf,

    /// Repository strategy settings
    pub repository: RepositorySettings,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ timeout: {}s, concurrency: {}, cache: {}x/{}s, local_dir: {}, network: {} }}",
            self.timeout.as_secs(),
            self.concurrency,
            self.cache_capacity,
            self.cache_ttl.as_secs(),
            self.local_dir.display(),
            self.repository.enabled,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A duration or count is zero
    /// - `local.dir` starts with `~` and no home directory is known
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let engine = toml.map(|t| &t.engine);
        let cache = toml.map(|t| &t.cache);

        let timeout = positive_secs(
            "timeout",
            cli.timeout
                .or_else(|| engine.and_then(|e| e.timeout))
                .unwrap_or(defaults::TIMEOUT_SECS),
        )?;

        let concurrency = positive_count(
            "concurrency",
            cli.concurrency
                .or_else(|| engine.and_then(|e| e.concurrency))
                .unwrap_or(defaults::CONCURRENCY),
        )?;

        let cache_capacity = NonZeroUsize::new(
            cli.cache_capacity
                .or_else(|| cache.and_then(|c| c.capacity))
                .unwrap_or(defaults::CACHE_CAPACITY),
        )
        .ok_or_else(|| ConfigError::zero_value("cache.capacity"))?;

        let cache_ttl = positive_secs(
            "cache.ttl",
            cli.cache_ttl
                .or_else(|| cache.and_then(|c| c.ttl))
                .unwrap_or(defaults::CACHE_TTL_SECS),
        )?;

        // TOML-only
        let sweep_interval = positive_secs(
            "cache.sweep_interval",
            cache
                .and_then(|c| c.sweep_interval)
                .unwrap_or(defaults::SWEEP_INTERVAL_SECS),
        )?;

        Ok(Self {
            timeout,
            concurrency,
            cache_capacity,
            cache_ttl,
            sweep_interval,
            local_dir: Self::resolve_local_dir(cli, toml)?,
            repository: Self::resolve_repository(cli, toml)?,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_local_dir(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        let dir = cli.local_dir.clone().unwrap_or_else(|| {
            PathBuf::from(
                toml.and_then(|t| t.local.dir.as_deref())
                    .unwrap_or(defaults::LOCAL_DIR),
            )
        });

        expand_home(&dir)
    }

    fn resolve_repository(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RepositorySettings, ConfigError> {
        let section = toml.map(|t| &t.repository);

        let enabled = !cli.no_network && section.and_then(|r| r.enabled).unwrap_or(true);

        let max_body_bytes = positive_count(
            "repository.max_body_bytes",
            section
                .and_then(|r| r.max_body_bytes)
                .unwrap_or(defaults::MAX_BODY_BYTES),
        )?;

        let user_agent = section
            .and_then(|r| r.user_agent.as_deref())
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
            .map(ToString::to_string);

        Ok(RepositorySettings {
            enabled,
            max_body_bytes,
            user_agent,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn positive_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::zero_duration(field));
    }
    Ok(Duration::from_secs(seconds))
}

fn positive_count(field: &'static str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::zero_value(field));
    }
    Ok(value)
}

/// Replaces a leading `~` with the home directory.
fn expand_home(path: &Path) -> Result<PathBuf, ConfigError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    dirs::home_dir()
        .map(|home| home.join(rest))
        .ok_or_else(|| ConfigError::NoHomeDir {
            path: path.to_path_buf(),
        })
}
