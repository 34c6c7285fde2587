//! Flat `key <sep> value` parsers.

use super::PendingDoc;
use crate::schema::{Config, Setting};

/// `key = value` lines preceded by `#` documentation.
///
/// Comment lines accumulate into a pending description that is attached to
/// the next setting. Blank lines do not reset it.
pub(super) fn documented_pairs(config: &mut Config, text: &str) {
    let mut doc = PendingDoc::default();

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            doc.push(comment);
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) if is_option_name(key.trim()) => {
                let setting = Setting::inferred(key.trim(), value.trim()).with_desc(doc.take());
                config.insert(setting);
            }
            _ => doc.clear(),
        }
    }
}

/// Lowercase ASCII letters, digits, `-` and `_`.
fn is_option_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

/// `option value` lines as printed by `tmux show-options`.
pub(super) fn tmux_options(config: &mut Config, text: &str) {
    for line in text.lines().map(str::trim) {
        let Some((key, value)) = line.split_once(' ') else {
            continue;
        };
        if key.is_empty() || key.starts_with('#') {
            continue;
        }
        config.insert(Setting::inferred(key, value.trim()));
    }
}

/// `key=value` lines as printed by `git config --list`, with or without
/// a `--show-origin` prefix.
pub(super) fn git_list(config: &mut Config, text: &str) {
    for line in text.lines().map(str::trim) {
        let Some(entry) = strip_git_origin(line) else {
            continue;
        };
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        config.insert(Setting::inferred(key, value.trim()));
    }
}

fn strip_git_origin(line: &str) -> Option<&str> {
    if !line.contains('=') {
        return None;
    }
    if let Some((_, entry)) = line.split_once('\t') {
        return Some(entry);
    }
    // `file:/path:key=value` without the tab; origin ends at the last colon before `=`
    let eq = line.find('=')?;
    Some(line[..eq].rfind(':').map_or(line, |colon| &line[colon + 1..]))
}

const SEPARATORS: [&str; 3] = [":", "=", " "];

/// Generic reader for local files in any of the supported formats.
pub(super) fn separated_pairs(config: &mut Config, text: &str) {
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        let Some((idx, sep)) = SEPARATORS
            .iter()
            .find_map(|sep| line.find(sep).filter(|&i| i > 0).map(|i| (i, *sep)))
        else {
            continue;
        };

        let key = line[..idx].trim_matches(|c| matches!(c, '"' | '\'' | ' '));
        let value = line[idx + sep.len()..].trim_matches(|c| matches!(c, '"' | '\'' | ',' | ' '));

        if key.is_empty() || key.contains(['{', '}', '[', ']']) {
            continue;
        }
        config.insert(Setting::inferred(key, value));
    }
}
