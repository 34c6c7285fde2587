//! Per-setting validation rules.

use serde::{Deserialize, Serialize};

use crate::schema::SettingType;

/// Constraints on one setting's value.
///
/// `min`/`max` apply to numbers, `pattern` to strings, `values` to strings
/// and choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Expected type
    #[serde(rename = "type")]
    pub kind: SettingType,

    /// Reported missing by [`Validator::validate_config`](super::Validator::validate_config) if absent
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Regular expression the whole value must match (anchor it yourself)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Allowed values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl ValidationRule {
    /// An optional rule of type `kind` with no further constraints.
    #[must_use]
    pub const fn new(kind: SettingType) -> Self {
        Self {
            kind,
            required: false,
            min: None,
            max: None,
            pattern: None,
            values: Vec::new(),
        }
    }

    /// String rule.
    #[must_use]
    pub const fn string() -> Self {
        Self::new(SettingType::String)
    }

    /// Number rule.
    #[must_use]
    pub const fn number() -> Self {
        Self::new(SettingType::Number)
    }

    /// Boolean rule.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(SettingType::Boolean)
    }

    /// Choice rule limited to `values`.
    #[must_use]
    pub fn choice<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SettingType::Choice).with_values(values)
    }

    /// Marks the setting as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets inclusive bounds.
    #[must_use]
    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Sets the pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the allowed values.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }
}

const HEX_COLOR: &str = "^#[0-9A-Fa-f]{6}$";

/// Rules for settings common to terminals and editors.
#[must_use]
pub fn default_rules() -> Vec<(&'static str, ValidationRule)> {
    vec![
        (
            "font-family",
            ValidationRule::string().with_values(["monospace", "serif", "sans-serif"]),
        ),
        ("font-size", ValidationRule::number().with_range(8.0, 72.0)),
        ("background", ValidationRule::string().with_pattern(HEX_COLOR)),
        ("foreground", ValidationRule::string().with_pattern(HEX_COLOR)),
        ("window-width", ValidationRule::number().with_range(100.0, 3000.0)),
        ("window-height", ValidationRule::number().with_range(100.0, 2000.0)),
        ("mouse-support", ValidationRule::boolean()),
        ("confirm-quit", ValidationRule::boolean()),
        (
            "cursor-shape",
            ValidationRule::choice(["block", "underline", "bar"]),
        ),
        ("shell", ValidationRule::string()),
    ]
}
