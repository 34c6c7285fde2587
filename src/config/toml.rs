//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Extraction engine limits
    #[serde(default)]
    pub engine: EngineSection,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheSection,

    /// Local strategy settings
    #[serde(default)]
    pub local: LocalSection,

    /// Repository strategy settings
    #[serde(default)]
    pub repository: RepositorySection,
}

/// Engine configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// Per-extraction timeout in seconds
    pub timeout: Option<u64>,

    /// Batch worker count
    pub concurrency: Option<usize>,
}

/// Cache configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    /// Maximum number of entries
    pub capacity: Option<usize>,

    /// Entry lifetime in seconds
    pub ttl: Option<u64>,

    /// Seconds between expired-entry sweeps
    pub sweep_interval: Option<u64>,
}

/// Local strategy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalSection {
    /// Directory holding `<app>.<ext>` files; `~` is expanded
    pub dir: Option<String>,
}

/// Repository strategy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositorySection {
    /// Set to false to skip network fetches
    pub enabled: Option<bool>,

    /// Cap on downloaded file size in bytes
    pub max_body_bytes: Option<usize>,

    /// `User-Agent` sent with each request
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# cfgprobe configuration file

[engine]
# Per-extraction timeout in seconds (default: 30)
timeout = 30

# Apps extracted in parallel by `cfgprobe batch` (default: 8)
# concurrency = 8

[cache]
# Maximum number of cached configs (default: 100)
# capacity = 100

# Cache entry lifetime in seconds (default: 86400 = 24h)
# ttl = 86400

# Seconds between sweeps of expired entries (default: 300)
# sweep_interval = 300

[local]
# Directory holding local copies named <app>.<ext> (default: "configs")
# "~" expands to your home directory
# dir = "~/.config/cfgprobe/configs"

[repository]
# Fetch defaults from public source repositories (default: true)
# Also disabled by the --no-network flag
# enabled = true

# Cap on downloaded file size in bytes (default: 10485760)
# max_body_bytes = 10485760

# User-Agent header sent with each request (default: "cfgprobe/<version>")
# user_agent = "cfgprobe"
"#
    .to_string()
}
