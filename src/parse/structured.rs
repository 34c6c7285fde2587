//! JSON-like, YAML-like and Lua-like line scanners.
//!
//! Nesting is not tracked except for one level of YAML sections; multi-line
//! values contribute only their opening line.

use crate::schema::{Config, Setting, SettingValue, infer_json_type, infer_lua_type, parse_value};

/// `"key": value` members, one per line.
///
/// Skips `//` and `/*` comment lines and keys starting with `_` or `$`
/// (schema annotations and private fields).
pub(super) fn json_members(config: &mut Config, text: &str) {
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with("//") || line.starts_with("/*") {
            continue;
        }
        if !line.contains('"') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim().trim_matches('"');
        let value = value.trim().trim_end_matches(',').trim();
        if key.is_empty() || key.starts_with('_') || key.starts_with('$') {
            continue;
        }

        let mut setting = Setting::new(key, infer_json_type(value));
        setting.default = scalar_default(value, "null");
        config.insert(setting);
    }
}

/// `key: value` lines with one level of sections.
///
/// A key with no value opens a section; indented keys that follow are
/// recorded as `section.key`. An unindented key with a value closes it.
pub(super) fn yaml_lines(config: &mut Config, text: &str) {
    let mut section: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim().trim_matches(|c| c == '"' || c == '\'');
        let value = strip_trailing_comment(value.trim(), " #");
        if key.is_empty() {
            continue;
        }

        if value.is_empty() {
            section = Some(key.to_string());
            continue;
        }

        let top_level = !raw.starts_with([' ', '\t']);
        if top_level {
            section = None;
        }

        let name = match &section {
            Some(section) => format!("{section}.{key}"),
            None => key.to_string(),
        };
        config.insert(Setting::inferred(name, value));
    }
}

/// `config.key = value` assignments.
pub(super) fn lua_assignments(config: &mut Config, text: &str) {
    for line in text.lines().map(str::trim) {
        if line.starts_with("--") {
            continue;
        }
        let Some((target, value)) = line.split_once('=') else {
            continue;
        };
        let Some(key) = target.trim().strip_prefix("config.") else {
            continue;
        };

        let value = strip_trailing_comment(value.trim(), " --");
        // `config.x == y` is a comparison, not an assignment
        if key.is_empty() || value.starts_with('=') {
            continue;
        }
        let value = value.trim_end_matches(',').trim();

        let mut setting = Setting::new(key, infer_lua_type(value));
        setting.default = scalar_default(value, "nil");
        config.insert(setting);
    }
}

/// Parsed default, or `None` for null literals and values that continue on
/// following lines.
fn scalar_default(value: &str, null: &str) -> Option<SettingValue> {
    let unclosed = (value.starts_with('{') && !value.ends_with('}'))
        || (value.starts_with('[') && !value.ends_with(']'));
    if value.is_empty() || value == null || unclosed {
        return None;
    }
    Some(parse_value(value))
}

fn strip_trailing_comment<'a>(value: &'a str, marker: &str) -> &'a str {
    if value.starts_with(['"', '\'']) {
        return value;
    }
    value.split_once(marker).map_or(value, |(v, _)| v).trim()
}
