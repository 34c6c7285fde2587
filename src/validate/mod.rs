//! Rule-based validation of setting values.
//!
//! Validation never fails as an operation: problems come back as
//! human-readable messages in a [`ValidationResult`]. A setting without a
//! rule is always valid.
//!
//! Two specialized checkers sit beside the rule engine:
//! [`KeybindValidator`] for `keys=action` bindings and
//! [`GhosttySchemaValidator`] for Ghostty's closed field list.

mod ghostty;
mod keybind;
mod rule;

#[cfg(test)]
mod ghostty_tests;
#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use ghostty::{FieldSchema, GhosttySchemaValidator};
pub use keybind::{KeybindResult, KeybindValidator};
pub use rule::{ValidationRule, default_rules};

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::schema::{Config, SettingType, SettingValue};

/// A rule could not be registered.
#[derive(Debug, Error)]
#[error("Invalid pattern for {setting}")]
pub struct RuleError {
    /// Setting the rule was for
    pub setting: String,
    /// Regex compile failure
    #[source]
    pub source: regex::Error,
}

/// Outcome of a validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    /// True when `errors` is empty
    pub valid: bool,
    /// One message per violated constraint
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: ValidationRule,
    pattern: Option<Regex>,
}

/// Checks values against per-setting [`ValidationRule`]s.
///
/// # Example
///
/// ```
/// use cfgprobe::schema::SettingValue;
/// use cfgprobe::validate::{ValidationRule, Validator};
///
/// let mut validator = Validator::new();
/// validator
///     .add_rule("font-size", ValidationRule::number().with_range(8.0, 72.0))
///     .unwrap();
///
/// assert!(validator.validate("font-size", &SettingValue::from(14)).valid);
/// assert!(!validator.validate("font-size", &SettingValue::from(200)).valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: BTreeMap<String, CompiledRule>,
}

impl Validator {
    /// A validator with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator preloaded with [`default_rules`].
    #[must_use]
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        for (setting, rule) in default_rules() {
            if let Err(e) = validator.add_rule(setting, rule) {
                tracing::warn!(error = %e, "Skipping default rule");
            }
        }
        validator
    }

    /// Registers or replaces the rule for `setting`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if the rule's pattern is not a valid regex.
    pub fn add_rule(
        &mut self,
        setting: impl Into<String>,
        rule: ValidationRule,
    ) -> Result<&mut Self, RuleError> {
        let setting = setting.into();
        let pattern = rule
            .pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|source| RuleError {
                setting: setting.clone(),
                source,
            })?;

        self.rules.insert(setting, CompiledRule { rule, pattern });
        Ok(self)
    }

    /// The rule registered for `setting`.
    #[must_use]
    pub fn rule(&self, setting: &str) -> Option<&ValidationRule> {
        self.rules.get(setting).map(|c| &c.rule)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validates one value of `setting`.
    #[must_use]
    pub fn validate(&self, setting: &str, value: &SettingValue) -> ValidationResult {
        let Some(compiled) = self.rules.get(setting) else {
            return ValidationResult::from_errors(Vec::new());
        };
        ValidationResult::from_errors(check(setting, compiled, value))
    }

    /// Validates every setting default in `config` and checks required settings.
    ///
    /// Settings without a default have nothing to check and pass.
    #[must_use]
    pub fn validate_config(&self, config: &Config) -> ValidationResult {
        let mut errors: Vec<String> = self
            .rules
            .iter()
            .filter(|(name, c)| c.rule.required && config.get(name).is_none())
            .map(|(name, _)| format!("required setting {name} is missing"))
            .collect();

        for (name, setting) in &config.settings {
            if let (Some(compiled), Some(value)) = (self.rules.get(name), &setting.default) {
                errors.extend(check(name, compiled, value));
            }
        }

        ValidationResult::from_errors(errors)
    }
}

fn check(setting: &str, compiled: &CompiledRule, value: &SettingValue) -> Vec<String> {
    let rule = &compiled.rule;
    let mut errors = Vec::new();

    if !has_type(value, rule.kind) {
        errors.push(format!("{setting} must be of type {}", rule.kind));
    }

    match rule.kind {
        SettingType::String => {
            if let Some(text) = value.as_text() {
                if compiled.pattern.as_ref().is_some_and(|re| !re.is_match(text)) {
                    errors.push(format!("{setting} does not match required pattern"));
                }
                check_values(setting, &rule.values, text, &mut errors);
            }
        }
        SettingType::Number => {
            if let Some(n) = value.as_f64() {
                check_range(setting, rule, n, &mut errors);
            }
        }
        SettingType::Choice => check_values(setting, &rule.values, &value.to_string(), &mut errors),
        SettingType::Boolean | SettingType::Array => {}
    }

    errors
}

fn has_type(value: &SettingValue, kind: SettingType) -> bool {
    match kind {
        SettingType::String | SettingType::Choice => value.as_text().is_some(),
        SettingType::Number => value.as_f64().is_some(),
        SettingType::Boolean => value.as_bool().is_some(),
        SettingType::Array => matches!(value, SettingValue::List(_)),
    }
}

fn check_values(setting: &str, allowed: &[String], text: &str, errors: &mut Vec<String>) {
    if !allowed.is_empty() && !allowed.iter().any(|v| v == text) {
        errors.push(format!("{setting} must be one of: {}", allowed.join(", ")));
    }
}

fn check_range(setting: &str, rule: &ValidationRule, n: f64, errors: &mut Vec<String>) {
    if let Some(min) = rule.min.filter(|&min| n < min) {
        errors.push(format!("{setting} must be at least {min}"));
    }
    if let Some(max) = rule.max.filter(|&max| n > max) {
        errors.push(format!("{setting} cannot exceed {max}"));
    }
}
