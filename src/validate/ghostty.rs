//! Strict field checks for Ghostty configs.
//!
//! Unlike [`Validator`](super::Validator), which ignores settings it has no
//! rule for, this validator rejects any field outside its known set.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::ValidationResult;
use crate::schema::{Config, SettingValue};

/// Six- or three-digit hex, or a bare color name.
const COLOR_PATTERN: &str = r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$|^[a-zA-Z]+$";

static COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COLOR_PATTERN).expect("color pattern is a valid regex"));

const CURSOR_STYLES: &[&str] = &["block", "bar", "underline", "outline"];

/// Expected shape of one Ghostty field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSchema {
    /// Free text
    Text,
    /// Numeric literal
    Number,
    /// Boolean literal
    Boolean,
    /// Text restricted to the listed values
    Enum(&'static [&'static str]),
    /// Hex or named color
    Color,
}

/// Validates Ghostty settings against a closed field list.
///
/// # Example
///
/// ```
/// use cfgprobe::schema::SettingValue;
/// use cfgprobe::validate::GhosttySchemaValidator;
///
/// let validator = GhosttySchemaValidator::new();
///
/// assert!(validator.validate_field("cursor-style", &SettingValue::from("bar")).valid);
/// assert!(!validator.validate_field("cursor-blink", &SettingValue::from(true)).valid);
/// ```
#[derive(Debug, Clone)]
pub struct GhosttySchemaValidator {
    fields: BTreeMap<String, FieldSchema>,
}

impl Default for GhosttySchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl GhosttySchemaValidator {
    /// A validator knowing the core Ghostty fields.
    #[must_use]
    pub fn new() -> Self {
        let fields = [
            ("font-family", FieldSchema::Text),
            ("font-size", FieldSchema::Number),
            ("cursor-style", FieldSchema::Enum(CURSOR_STYLES)),
            ("cursor-color", FieldSchema::Color),
            ("window-padding-x", FieldSchema::Number),
            ("window-padding-y", FieldSchema::Number),
            ("background", FieldSchema::Color),
            ("foreground", FieldSchema::Color),
            ("cursor-invert-fg-bg", FieldSchema::Boolean),
        ];

        Self {
            fields: fields
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
        }
    }

    /// Adds or replaces a known field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.fields.insert(name.into(), schema);
        self
    }

    /// Schema for `field`, if known.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<FieldSchema> {
        self.fields.get(field).copied()
    }

    /// Validates one value.
    #[must_use]
    pub fn validate_field(&self, field: &str, value: &SettingValue) -> ValidationResult {
        ValidationResult::from_errors(self.field_errors(field, Some(value)))
    }

    /// Validates every setting of `config`.
    ///
    /// Unknown fields are errors whether or not they carry a default; type
    /// checks need a default to look at.
    #[must_use]
    pub fn validate_config(&self, config: &Config) -> ValidationResult {
        let errors = config
            .settings
            .iter()
            .flat_map(|(name, setting)| self.field_errors(name, setting.default.as_ref()))
            .collect();
        ValidationResult::from_errors(errors)
    }

    fn field_errors(&self, field: &str, value: Option<&SettingValue>) -> Vec<String> {
        let Some(schema) = self.field(field) else {
            return vec![format!(
                "field '{field}' is not a valid Ghostty configuration option"
            )];
        };
        value
            .and_then(|value| check(field, schema, value))
            .into_iter()
            .collect()
    }
}

fn check(field: &str, schema: FieldSchema, value: &SettingValue) -> Option<String> {
    match (schema, value) {
        (FieldSchema::Text, SettingValue::Text(_))
        | (FieldSchema::Number, SettingValue::Number(_))
        | (FieldSchema::Boolean, SettingValue::Bool(_)) => None,
        (FieldSchema::Enum(allowed), SettingValue::Text(text)) => {
            let known = allowed.contains(&text.as_str());
            (!known).then(|| format!("field '{field}' must be one of: {}", allowed.join(", ")))
        }
        (FieldSchema::Color, SettingValue::Text(text)) => (!COLOR.is_match(text)).then(|| {
            format!("field '{field}' must be a valid color (hex or named color)")
        }),
        (FieldSchema::Text | FieldSchema::Enum(_), _) => {
            Some(format!("field '{field}' must be of type string"))
        }
        (FieldSchema::Number, _) => Some(format!("field '{field}' must be of type number")),
        (FieldSchema::Boolean, _) => Some(format!("field '{field}' must be of type boolean")),
        (FieldSchema::Color, _) => Some(format!("field '{field}' must be of type color")),
    }
}
