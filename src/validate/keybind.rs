//! Keybind syntax checks.
//!
//! A keybind reads `keys=action[:argument]`, with keys joined by `+`. Bad
//! keys are errors; an unrecognized action is only a warning, since apps
//! grow new actions faster than this list.

use std::collections::BTreeSet;

use serde::Serialize;

const MODIFIERS: &[&str] = &[
    "ctrl", "shift", "alt", "super", "meta", "cmd", "command", "opt", "option",
];

const SPECIAL_KEYS: &[&str] = &[
    "escape",
    "enter",
    "return",
    "tab",
    "space",
    "backspace",
    "delete",
    "insert",
    "home",
    "end",
    "pageup",
    "pagedown",
    "up",
    "down",
    "left",
    "right",
];

/// Highest function key accepted (`f1` through `f20`).
const MAX_FUNCTION_KEY: u8 = 20;

const ACTIONS: &[&str] = &[
    "copy",
    "paste",
    "cut",
    "select_all",
    "undo",
    "redo",
    "quit",
    "close",
    "new_window",
    "new_tab",
    "close_tab",
    "next_tab",
    "prev_tab",
    "goto_tab",
    "split_horizontal",
    "split_vertical",
    "close_split",
    "resize_split_left",
    "resize_split_right",
    "resize_split_up",
    "resize_split_down",
    "focus_left",
    "focus_right",
    "focus_up",
    "focus_down",
    "reload_config",
    "toggle_fullscreen",
    "scroll_up",
    "scroll_down",
    "scroll_page_up",
    "scroll_page_down",
    "scroll_home",
    "scroll_end",
    "clear",
    "reset",
];

/// Outcome of a keybind check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct KeybindResult {
    /// True when `errors` is empty
    pub valid: bool,
    /// Problems that make the keybind unusable
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Suspicious but accepted parts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl KeybindResult {
    fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Checks keybind strings.
///
/// # Example
///
/// ```
/// use cfgprobe::validate::KeybindValidator;
///
/// let validator = KeybindValidator::new();
///
/// assert!(validator.validate("ctrl+shift+c=copy").valid);
/// assert!(!validator.validate("hyper+c=copy").valid);
/// assert_eq!(validator.validate("ctrl+c=launch").warnings.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct KeybindValidator {
    actions: BTreeSet<String>,
}

impl Default for KeybindValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindValidator {
    /// A validator knowing the common terminal actions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: ACTIONS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Accepts `action` without a warning.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.insert(action.into());
        self
    }

    /// Validates a full `keys=action` binding.
    #[must_use]
    pub fn validate(&self, keybind: &str) -> KeybindResult {
        let Some((keys, action)) = keybind.split_once('=') else {
            return KeybindResult::error("keybind must contain '=' separator");
        };
        let (keys, action) = (keys.trim(), action.trim());

        if keys.is_empty() {
            return KeybindResult::error("keybind keys cannot be empty");
        }
        if action.is_empty() {
            return KeybindResult::error("keybind action cannot be empty");
        }

        let KeybindResult {
            errors,
            mut warnings,
            ..
        } = self.validate_keys(keys);
        warnings.extend(self.action_warning(action));
        KeybindResult::from_parts(errors, warnings)
    }

    /// Validates the key combination alone, e.g. `ctrl+shift+c`.
    #[must_use]
    pub fn validate_keys(&self, keys: &str) -> KeybindResult {
        if keys.trim().is_empty() {
            return KeybindResult::error("keybind must contain at least one valid key");
        }

        let errors = keys
            .to_lowercase()
            .split('+')
            .map(str::trim)
            .filter(|key| !key.is_empty() && !is_valid_key(key))
            .map(|key| format!("invalid key component: '{key}'"))
            .collect();
        KeybindResult::from_parts(errors, Vec::new())
    }

    fn action_warning(&self, action: &str) -> Option<String> {
        let base = action.split_once(':').map_or(action, |(base, _)| base);
        (!self.actions.contains(base)).then(|| format!("unknown action: '{base}'"))
    }
}

fn is_valid_key(key: &str) -> bool {
    MODIFIERS.contains(&key)
        || SPECIAL_KEYS.contains(&key)
        || is_function_key(key)
        || matches!(key.as_bytes(), [c] if c.is_ascii_lowercase() || c.is_ascii_digit())
}

fn is_function_key(key: &str) -> bool {
    key.strip_prefix('f')
        .filter(|n| !n.starts_with('0'))
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=MAX_FUNCTION_KEY).contains(&n))
}
