//! Operator configuration for the `cfgprobe` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Every value is resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file**
//! 3. **Built-in defaults**
//!
//! # Boolean Flag Semantics
//!
//! `--no-network` only disables: if either `--no-network` is given or
//! `repository.enabled = false` is set, the repository strategy is off.
//!
//! # TOML-Only Options
//!
//! - `cache.sweep_interval` (default: 300s)
//! - `repository.max_body_bytes` (default: 10 MiB)
//! - `repository.user_agent` (default: `cfgprobe/<version>`)

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{RepositorySettings, ValidatedConfig, write_default_config};
