//! Line-oriented parsers that turn program output and source files into settings.
//!
//! None of these are real grammars. Each scans line by line, recognizes the
//! handful of shapes a given tool emits, and skips everything else, so
//! malformed input yields fewer settings rather than an error.
//!
//! - [`OutputParser`]: per-tool parsers for introspection command output
//! - [`parse_document`]: dispatch on file extension for repository files
//! - [`parse_local`]: the generic separator-based reader for local copies

mod docs;
mod keyvalue;
mod structured;


use serde::{Deserialize, Serialize};

use crate::schema::{Config, Format};

/// Parser applied to a program's introspection output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputParser {
    /// `key = value` lines with `#` documentation comments (ghostty)
    KeyValue,
    /// `"key": value` members, one per line (zed)
    Json,
    /// `config.key = value` assignments (wezterm)
    Lua,
    /// `option value` pairs (tmux `show-options`)
    Tmux,
    /// `origin<TAB>key=value` pairs (git `config --list --show-origin`)
    Git,
}

impl OutputParser {
    /// Format recorded on configs produced by this parser.
    #[must_use]
    pub const fn format(self) -> Format {
        match self {
            Self::KeyValue | Self::Tmux => Format::Custom,
            Self::Json => Format::Json,
            Self::Lua => Format::Lua,
            Self::Git => Format::Ini,
        }
    }

    /// Parses `output` into a config for `app`.
    ///
    /// Returns `None` when no setting could be recognized.
    #[must_use]
    pub fn parse(self, app: &str, output: &str) -> Option<Config> {
        let mut config = Config::new(app, self.format());
        match self {
            Self::KeyValue => keyvalue::documented_pairs(&mut config, output),
            Self::Json => structured::json_members(&mut config, output),
            Self::Lua => structured::lua_assignments(&mut config, output),
            Self::Tmux => keyvalue::tmux_options(&mut config, output),
            Self::Git => keyvalue::git_list(&mut config, output),
        }
        (!config.is_empty()).then_some(config)
    }
}

/// Parses a repository file, choosing the parser from `path`'s extension.
///
/// Unknown extensions are sniffed: JSON-looking content, then YAML-looking,
/// then `--flag` text.
#[must_use]
pub fn parse_document(app: &str, path: &str, text: &str, format: Format) -> Config {
    let mut config = Config::new(app, format);
    let ext = path.rsplit_once('.').map_or("", |(_, ext)| ext);

    match ext {
        "json" => structured::json_members(&mut config, text),
        "yml" | "yaml" => structured::yaml_lines(&mut config, text),
        "md" => docs::markdown(&mut config, text),
        "rs" => docs::rust_fields(&mut config, text),
        "c" => docs::c_option_table(&mut config, text),
        "txt" => docs::flag_text(&mut config, text),
        _ => docs::sniff(&mut config, text),
    }
    config
}

/// Parses a local config copy with the generic separator-based reader.
///
/// Lines starting with `#` or `//` are skipped. The first of `:`, `=` or a
/// space (not at column zero) splits key from value. Keys containing brackets
/// or braces are ignored.
#[must_use]
pub fn parse_local(app: &str, text: &str, format: Format) -> Config {
    let mut config = Config::new(app, format);
    keyvalue::separated_pairs(&mut config, text);
    config
}

/// Description text accumulated from comment lines.
#[derive(Debug, Default)]
struct PendingDoc(String);

impl PendingDoc {
    fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(line);
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.0)
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}
