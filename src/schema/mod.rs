//! Normalized configuration schema types.
//!
//! This module provides:
//! - The per-application record ([`Config`]) and its fields ([`Setting`])
//! - A typed value union for defaults ([`SettingValue`])
//! - Provenance metadata ([`ExtractionSource`])
//! - Shared inference helpers ([`infer_type`], [`parse_value`], [`infer_category`])
//! - Config comparison ([`diff`], [`ConfigDiff`])

mod diff;
mod infer;

#[cfg(test)]
mod diff_tests;

pub use diff::{ConfigDiff, ValueChange, diff};
pub use infer::{infer_category, infer_json_type, infer_lua_type, infer_type, is_numeric, parse_value};

use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// On-disk format of an application's configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON (possibly with comments, as editors tend to ship it)
    Json,
    /// YAML
    Yaml,
    /// TOML
    Toml,
    /// Lua scripts (wezterm, neovim)
    Lua,
    /// INI-style sections (git)
    Ini,
    /// Application-specific `key = value` syntax
    Custom,
    /// Prose or documentation scraped for option names
    Text,
    /// Programs configured through command-line style flags
    Flags,
}

impl Format {
    /// Returns the lowercase identifier used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Lua => "lua",
            Self::Ini => "ini",
            Self::Custom => "custom",
            Self::Text => "text",
            Self::Flags => "flags",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    /// Free text
    String,
    /// Integer or decimal
    Number,
    /// `true` / `false`
    Boolean,
    /// One of an enumerated set of strings
    Choice,
    /// A list of values
    Array,
}

impl SettingType {
    /// Returns the lowercase identifier used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Choice => "choice",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loosely-sourced value with a closed set of shapes.
///
/// Serializes untagged, so `SettingValue::Number(14.0)` becomes `14.0` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean literal
    Bool(bool),
    /// Numeric literal
    Number(f64),
    /// Anything else, kept verbatim
    Text(String),
    /// Bracketed or braced list
    List(Vec<SettingValue>),
}

impl SettingValue {
    /// The setting type this value naturally belongs to.
    #[must_use]
    pub const fn kind(&self) -> SettingType {
        match self {
            Self::Bool(_) => SettingType::Boolean,
            Self::Number(_) => SettingType::Number,
            Self::Text(_) => SettingType::String,
            Self::List(_) => SettingType::Array,
        }
    }

    /// Numeric view: numbers directly, text if it parses as a float.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) | Self::List(_) => None,
        }
    }

    /// Boolean view: booleans directly, text if it is a boolean literal.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(_) | Self::List(_) => None,
        }
    }

    /// Returns the text if this is a [`SettingValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for SettingValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for SettingValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// One configurable field of an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Setting name as the application spells it
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub kind: SettingType,

    /// Default or current value, if the source exposed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<SettingValue>,

    /// Enumerated valid choices (empty if unconstrained)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,

    /// Human-readable description
    #[serde(default, rename = "description", skip_serializing_if = "String::is_empty")]
    pub desc: String,

    /// Coarse category such as "font" or "window"
    pub category: String,
}

impl Setting {
    /// Creates a setting with the given type, no default, and an inferred category.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SettingType) -> Self {
        let name = name.into();
        let category = infer_category(&name).to_string();
        Self {
            name,
            kind,
            default: None,
            values: Vec::new(),
            desc: String::new(),
            category,
        }
    }

    /// Creates a setting from a raw textual value.
    ///
    /// Type, default and category are all inferred.
    #[must_use]
    pub fn inferred(name: impl Into<String>, raw_value: &str) -> Self {
        let mut setting = Self::new(name, infer_type(raw_value));
        setting.default = Some(parse_value(raw_value));
        setting
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<SettingValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the enumerated choices.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Overrides the inferred category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Where a [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionSource {
    /// Strategy name (`cli`, `repository`, `local`, `builtin`)
    pub method: String,
    /// Command line used, repository path fetched, or file read
    pub location: String,
    /// Strategy-declared trust in this source, 0.0 to 1.0
    pub confidence: f64,
}

impl ExtractionSource {
    /// Creates a provenance record.
    #[must_use]
    pub fn new(method: impl Into<String>, location: impl Into<String>, confidence: f64) -> Self {
        Self {
            method: method.into(),
            location: location.into(),
            confidence,
        }
    }
}

/// Normalized configuration schema for one application.
///
/// Treated as immutable once built: the engine shares it as `Arc<Config>`
/// and a refresh always produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Application identifier
    pub app: String,
    /// Expected on-disk location (informational)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub config_path: String,
    /// On-disk format
    pub format: Format,
    /// Settings keyed by name
    pub settings: BTreeMap<String, Setting>,
    /// Provenance
    pub source: ExtractionSource,
    /// When this record was produced
    pub timestamp: SystemTime,
}

impl Config {
    /// Creates an empty config stamped with the current time.
    #[must_use]
    pub fn new(app: impl Into<String>, format: Format) -> Self {
        Self {
            app: app.into(),
            config_path: String::new(),
            format,
            settings: BTreeMap::new(),
            source: ExtractionSource::default(),
            timestamp: SystemTime::now(),
        }
    }

    /// Sets the informational config path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Stamps provenance.
    #[must_use]
    pub fn with_source(mut self, source: ExtractionSource) -> Self {
        self.source = source;
        self
    }

    /// Adds a setting, keyed by its name. A later insert replaces an earlier one.
    pub fn insert(&mut self, setting: Setting) {
        self.settings.insert(setting.name.clone(), setting);
    }

    /// Builder form of [`Config::insert`].
    #[must_use]
    pub fn with_setting(mut self, setting: Setting) -> Self {
        self.insert(setting);
        self
    }

    /// Attaches a description to an existing setting. No-op if absent or `desc` is empty.
    pub fn describe(&mut self, name: &str, desc: &str) {
        if desc.is_empty() {
            return;
        }
        if let Some(setting) = self.settings.get_mut(name) {
            setting.desc = desc.to_string();
        }
    }

    /// Looks up a setting by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.settings.get(name)
    }

    /// Number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Returns true if no settings were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}
