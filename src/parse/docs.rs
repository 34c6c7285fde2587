//! Heuristic option discovery in documentation and source files.
//!
//! These parsers recover names (and for Markdown, descriptions) only. Every
//! setting they produce is typed as a string with no default.

use super::PendingDoc;
use crate::schema::{Config, Setting, SettingType};

fn named(config: &mut Config, name: &str) {
    config.insert(Setting::new(name, SettingType::String));
}

/// `config.<key>` mentions and `##` headers become settings; the prose that
/// follows each one becomes its description.
///
/// Fenced code blocks are skipped unless the line mentions `config.`.
pub(super) fn markdown(config: &mut Config, text: &str) {
    let mut in_code = false;
    let mut current: Option<String> = None;
    let mut doc = PendingDoc::default();

    for line in text.lines().map(str::trim) {
        if line.starts_with("```") {
            in_code = !in_code;
            continue;
        }

        let mention = line.contains("config.");
        if in_code && !mention {
            continue;
        }

        let key = if mention {
            line.split_once("config.").and_then(|(_, rest)| first_word(rest))
        } else if let Some(header) = line.strip_prefix("##") {
            first_word(header.trim_start_matches('#'))
        } else {
            None
        };

        if let Some(key) = key {
            flush(config, current.as_deref(), &mut doc);
            named(config, key);
            current = Some(key.to_string());
        } else if current.is_some() && !line.is_empty() && !mention {
            doc.push(line);
        }
    }

    flush(config, current.as_deref(), &mut doc);
}

fn first_word(text: &str) -> Option<&str> {
    let word = text
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| matches!(c, '`' | '(' | ')' | '.' | ',' | ':' | ';'));
    (!word.is_empty()).then_some(word)
}

fn flush(config: &mut Config, current: Option<&str>, doc: &mut PendingDoc) {
    let desc = doc.take();
    if let Some(name) = current {
        config.describe(name, &desc);
    }
}

/// `pub field: Type` struct fields.
pub(super) fn rust_fields(config: &mut Config, text: &str) {
    for line in text.lines().map(str::trim) {
        let Some(rest) = line.strip_prefix("pub ") else {
            continue;
        };
        let Some((field, _)) = rest.split_once(':') else {
            continue;
        };
        let field = field.trim();
        let is_ident = field
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
            && field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_ident {
            named(config, field);
        }
    }
}

/// The first string literal on lines that open a brace, as in
/// `{ .name = "status-style", ... }` option tables.
pub(super) fn c_option_table(config: &mut Config, text: &str) {
    for line in text.lines().map(str::trim) {
        if !line.contains('{') {
            continue;
        }
        let Some((_, after)) = line.split_once('"') else {
            continue;
        };
        let Some((literal, _)) = after.split_once('"') else {
            continue;
        };
        if !literal.is_empty() && !literal.contains(char::is_whitespace) {
            named(config, literal);
        }
    }
}

/// `--flag` tokens in plain text such as help output or man pages.
pub(super) fn flag_text(config: &mut Config, text: &str) {
    for line in text.lines().map(str::trim) {
        if !line.contains("--") {
            continue;
        }
        for token in line.split_whitespace() {
            let Some(flag) = token.strip_prefix("--") else {
                continue;
            };
            let flag = flag.split('=').next().unwrap_or_default();
            let flag = flag.trim_matches(|c: char| matches!(c, '.' | ',' | ';' | '[' | ']'));
            if !flag.is_empty() && !flag.starts_with('-') {
                named(config, flag);
            }
        }
    }
}

/// Chooses a parser from the content itself.
pub(super) fn sniff(config: &mut Config, text: &str) {
    let has_colon = text.contains(':');
    if has_colon && text.contains('{') {
        super::structured::json_members(config, text);
    } else if has_colon {
        super::structured::yaml_lines(config, text);
    } else {
        flag_text(config, text);
    }
}
