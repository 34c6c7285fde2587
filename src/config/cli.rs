//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cfgprobe: configuration schema discovery
///
/// Discovers what can be configured in terminals, editors and shells by
/// racing CLI introspection, repository defaults, local copies and
/// built-in knowledge.
#[derive(Debug, Parser)]
#[command(name = "cfgprobe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Per-extraction timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of apps extracted in parallel by `batch`
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Cache entry lifetime in seconds
    #[arg(long = "cache-ttl", global = true, value_name = "SECS")]
    pub cache_ttl: Option<u64>,

    /// Maximum number of cached configs
    #[arg(long = "cache-capacity", global = true)]
    pub cache_capacity: Option<usize>,

    /// Directory holding local config copies
    #[arg(long = "local-dir", global = true, value_name = "DIR")]
    pub local_dir: Option<PathBuf>,

    /// Disable the repository strategy (no network access)
    #[arg(long = "no-network", global = true)]
    pub no_network: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for cfgprobe
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract one application's configuration schema as JSON
    Extract {
        /// Application name, e.g. `ghostty` or `nvim`
        app: String,
    },

    /// Extract several applications (default: every supported app)
    Batch {
        /// Application names
        apps: Vec<String>,
    },

    /// List supported applications
    Apps,

    /// Extract an application and check it against the default rules
    Validate {
        /// Application name
        app: String,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "cfgprobe.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
