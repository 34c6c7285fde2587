//! Heuristic type, value and category inference from raw text.
//!
//! These helpers are shared by every parser. They never fail: anything
//! unrecognized is a string.

use super::{SettingType, SettingValue};

/// Substring rules for [`infer_category`], checked in order.
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("font", &["font"]),
    ("appearance", &["color", "theme", "background", "foreground"]),
    ("window", &["window", "pane", "split"]),
    ("keybindings", &["key", "bind", "shortcut"]),
    ("editor", &["cursor", "indent"]),
    ("scrolling", &["scroll"]),
    ("terminal", &["shell", "prompt"]),
];

/// Infers a setting type from a plain-text value.
///
/// Boolean literals, then numeric literals, then bracket/brace-prefixed
/// arrays; everything else (including colors like `#ff00ff`) is a string.
#[must_use]
pub fn infer_type(value: &str) -> SettingType {
    let value = value.trim();

    if value == "true" || value == "false" {
        SettingType::Boolean
    } else if is_numeric(value) {
        SettingType::Number
    } else if value.starts_with('[') || value.starts_with('{') {
        SettingType::Array
    } else {
        SettingType::String
    }
}

/// Infers a setting type from the right-hand side of a JSON member.
///
/// Quoted values are strings even if their contents look numeric. Nested
/// objects are reported as strings since they are not flattened.
#[must_use]
pub fn infer_json_type(value: &str) -> SettingType {
    let value = value.trim().trim_end_matches(',').trim();

    if value == "true" || value == "false" {
        SettingType::Boolean
    } else if value.starts_with('"') || value.starts_with('{') {
        SettingType::String
    } else if value.starts_with('[') {
        SettingType::Array
    } else if is_numeric(value) {
        SettingType::Number
    } else {
        SettingType::String
    }
}

/// Infers a setting type from the right-hand side of a Lua assignment.
#[must_use]
pub fn infer_lua_type(value: &str) -> SettingType {
    let value = value.trim().trim_end_matches(',').trim();

    if value == "true" || value == "false" {
        SettingType::Boolean
    } else if value.starts_with('"') || value.starts_with('\'') {
        SettingType::String
    } else if value.starts_with('{') {
        SettingType::Array
    } else if is_numeric(value) {
        SettingType::Number
    } else {
        SettingType::String
    }
}

/// Returns true for optionally negative integers and decimals (`-3`, `1.25`).
///
/// Requires at least one digit and at most one dot; exponents are not accepted.
#[must_use]
pub fn is_numeric(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() {
        return false;
    }

    let mut dots = 0;
    let mut saw_digit = false;
    for c in digits.chars() {
        match c {
            '.' => {
                dots += 1;
                if dots > 1 {
                    return false;
                }
            }
            '0'..='9' => saw_digit = true,
            _ => return false,
        }
    }
    saw_digit
}

/// Converts raw text to a typed value.
///
/// Surrounding quotes mark an explicit string and are stripped. Bracketed or
/// braced text becomes a list of its comma-separated items.
#[must_use]
pub fn parse_value(raw: &str) -> SettingValue {
    let value = raw.trim().trim_end_matches(',').trim();

    if let Some(inner) = unquote(value) {
        return SettingValue::Text(inner.to_string());
    }

    match value {
        "true" => return SettingValue::Bool(true),
        "false" => return SettingValue::Bool(false),
        _ => {}
    }

    if is_numeric(value) {
        if let Ok(n) = value.parse::<f64>() {
            return SettingValue::Number(n);
        }
    }

    if let Some(inner) = strip_delimiters(value) {
        let items = inner
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(parse_value)
            .collect();
        return SettingValue::List(items);
    }

    SettingValue::Text(value.to_string())
}

/// Maps a setting name to a coarse category by substring match.
#[must_use]
pub fn infer_category(name: &str) -> &'static str {
    let name = name.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map_or("general", |&(category, _)| category)
}

fn unquote(value: &str) -> Option<&str> {
    if value.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
}

fn strip_delimiters(value: &str) -> Option<&str> {
    value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .or_else(|| value.strip_prefix('{').and_then(|v| v.strip_suffix('}')))
}
