//! Comparison of two extracted configs.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Config, SettingValue};

/// A default that differs between two configs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueChange {
    /// Default in the older config
    pub old: Option<SettingValue>,
    /// Default in the newer config
    pub new: Option<SettingValue>,
}

/// Setting-level differences between two configs, keyed by setting name.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConfigDiff {
    /// Present only in the newer config
    pub added: BTreeMap<String, Option<SettingValue>>,
    /// Present in both with different defaults
    pub modified: BTreeMap<String, ValueChange>,
    /// Present only in the older config
    pub removed: BTreeMap<String, Option<SettingValue>>,
    /// Present in both with equal defaults
    pub unchanged: BTreeMap<String, Option<SettingValue>>,
}

impl ConfigDiff {
    /// Returns true if anything was added, modified or removed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.modified.is_empty() || !self.removed.is_empty()
    }

    /// One-line summary such as `+2 added, ~1 modified, =5 unchanged`.
    #[must_use]
    pub fn summary(&self) -> String {
        if !self.has_changes() {
            return "No changes".to_string();
        }

        let parts = [
            (self.added.len(), '+', "added"),
            (self.modified.len(), '~', "modified"),
            (self.removed.len(), '-', "removed"),
            (self.unchanged.len(), '=', "unchanged"),
        ];

        parts
            .iter()
            .filter(|(count, _, _)| *count > 0)
            .map(|(count, sign, label)| format!("{sign}{count} {label}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Compares the settings (and their defaults) of two configs.
#[must_use]
pub fn diff(old: &Config, new: &Config) -> ConfigDiff {
    let mut result = ConfigDiff::default();

    for (name, setting) in &new.settings {
        match old.settings.get(name) {
            Some(previous) if previous.default == setting.default => {
                result.unchanged.insert(name.clone(), setting.default.clone());
            }
            Some(previous) => {
                result.modified.insert(
                    name.clone(),
                    ValueChange {
                        old: previous.default.clone(),
                        new: setting.default.clone(),
                    },
                );
            }
            None => {
                result.added.insert(name.clone(), setting.default.clone());
            }
        }
    }

    for (name, setting) in &old.settings {
        if !new.settings.contains_key(name) {
            result.removed.insert(name.clone(), setting.default.clone());
        }
    }

    result
}
