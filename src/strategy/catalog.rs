//! Static knowledge about supported applications.
//!
//! Strategies receive a [`Catalog`] at construction and copy the tables they
//! need, so nothing here is global. [`Catalog::standard`] holds the shipped
//! knowledge; tests and embedders start from [`Catalog::default`] (empty).

use std::collections::BTreeMap;
use std::time::Duration;

use crate::parse::OutputParser;
use crate::schema::{Config, Format, Setting, SettingType};

/// How to ask a program for its own configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliCommand {
    /// Executable name
    pub command: String,
    /// Arguments
    pub args: Vec<String>,
    /// Per-invocation limit
    pub timeout: Duration,
    /// Trust in this command's output
    pub confidence: f64,
    /// Parser for the combined output
    pub parser: OutputParser,
}

impl CliCommand {
    /// Creates a command entry.
    #[must_use]
    pub fn new(
        command: &str,
        args: &[&str],
        timeout: Duration,
        confidence: f64,
        parser: OutputParser,
    ) -> Self {
        Self {
            command: command.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            timeout,
            confidence,
            parser,
        }
    }

    /// The command line as recorded in provenance, e.g. `tmux show-options -g`.
    #[must_use]
    pub fn location(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Where an app's defaults live in its public repository.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoSource {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Candidate file paths, tried in order
    pub paths: Vec<String>,
    /// Format recorded on the result
    pub format: Format,
    /// Trust in this source
    pub confidence: f64,
}

impl RepoSource {
    /// Creates a repository entry.
    #[must_use]
    pub fn new(owner: &str, repo: &str, paths: &[&str], format: Format, confidence: f64) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            paths: paths.iter().map(ToString::to_string).collect(),
            format,
            confidence,
        }
    }
}

/// Immutable per-app tables shared by all strategies.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Introspection commands, keyed by app
    pub commands: BTreeMap<String, CliCommand>,
    /// Repository sources, keyed by app
    pub repositories: BTreeMap<String, RepoSource>,
    /// Hand-authored fallback configs, keyed by app
    pub builtin: BTreeMap<String, Config>,
    /// Alternative names, mapped to the canonical app name
    pub aliases: BTreeMap<String, String>,
    /// On-disk format of local copies, for apps that are not `custom`
    pub local_formats: BTreeMap<String, Format>,
    /// Usual config file location, recorded on results
    pub config_paths: BTreeMap<String, String>,
}

impl Catalog {
    /// The shipped knowledge about supported applications.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            commands: standard_commands(),
            repositories: standard_repositories(),
            builtin: standard_builtin(),
            aliases: pairs(&[("zed-editor", "zed"), ("nvim", "neovim")]),
            local_formats: [
                ("zed", Format::Json),
                ("vscode", Format::Json),
                ("alacritty", Format::Yaml),
                ("starship", Format::Yaml),
                ("wezterm", Format::Lua),
                ("git", Format::Ini),
                ("tmux", Format::Flags),
            ]
            .into_iter()
            .map(|(app, format)| (app.to_string(), format))
            .collect(),
            config_paths: pairs(&[
                ("ghostty", "~/.config/ghostty/config"),
                ("zed", "~/.config/zed/settings.json"),
                ("alacritty", "~/.config/alacritty/alacritty.yml"),
                ("wezterm", "~/.config/wezterm/wezterm.lua"),
                ("neovim", "~/.config/nvim/init.lua"),
                ("tmux", "~/.tmux.conf"),
                ("git", "~/.gitconfig"),
                ("kitty", "~/.config/kitty/kitty.conf"),
            ]),
        }
    }
}

fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn standard_commands() -> BTreeMap<String, CliCommand> {
    let secs = Duration::from_secs;
    [
        CliCommand::new(
            "ghostty",
            &["+show-config", "--default", "--docs"],
            secs(10),
            0.95,
            OutputParser::KeyValue,
        ),
        CliCommand::new("zed", &["--print-config"], secs(5), 0.90, OutputParser::Json),
        CliCommand::new("wezterm", &["show-config"], secs(5), 0.90, OutputParser::Lua),
        CliCommand::new("tmux", &["show-options", "-g"], secs(3), 0.85, OutputParser::Tmux),
        CliCommand::new(
            "git",
            &["config", "--list", "--show-origin"],
            secs(3),
            0.90,
            OutputParser::Git,
        ),
    ]
    .into_iter()
    .map(|cmd| (cmd.command.clone(), cmd))
    .collect()
}

fn standard_repositories() -> BTreeMap<String, RepoSource> {
    [
        (
            "zed",
            RepoSource::new(
                "zed-industries",
                "zed",
                &["assets/settings/default.json", "crates/editor/src/settings.rs"],
                Format::Json,
                0.85,
            ),
        ),
        (
            "alacritty",
            RepoSource::new(
                "alacritty",
                "alacritty",
                &["alacritty.yml", "extra/alacritty.yml"],
                Format::Yaml,
                0.80,
            ),
        ),
        (
            "wezterm",
            RepoSource::new(
                "wez",
                "wezterm",
                &["docs/config/lua/config/index.md", "config/src/lib.rs"],
                Format::Text,
                0.75,
            ),
        ),
        (
            "neovim",
            RepoSource::new(
                "neovim",
                "neovim",
                &["runtime/doc/options.txt", "src/nvim/options.lua"],
                Format::Text,
                0.70,
            ),
        ),
        (
            "tmux",
            RepoSource::new(
                "tmux",
                "tmux",
                &["options-table.c", "tmux.1"],
                Format::Text,
                0.65,
            ),
        ),
    ]
    .into_iter()
    .map(|(app, source)| (app.to_string(), source))
    .collect()
}

fn standard_builtin() -> BTreeMap<String, Config> {
    let tmux = Config::new("tmux", Format::Custom)
        .with_config_path("~/.tmux.conf")
        .with_setting(
            Setting::new("prefix", SettingType::String)
                .with_default("C-b")
                .with_category("keybindings"),
        )
        .with_setting(Setting::new("base-index", SettingType::Number).with_default(0))
        .with_setting(
            Setting::new("mouse", SettingType::Boolean)
                .with_default(false)
                .with_category("input"),
        )
        .with_setting(Setting::new("history-limit", SettingType::Number).with_default(2000));

    let git = Config::new("git", Format::Ini)
        .with_config_path("~/.gitconfig")
        .with_setting(Setting::new("user.name", SettingType::String).with_category("user"))
        .with_setting(Setting::new("user.email", SettingType::String).with_category("user"))
        .with_setting(
            Setting::new("core.editor", SettingType::String)
                .with_default("vim")
                .with_category("core"),
        )
        .with_setting(
            Setting::new("init.defaultBranch", SettingType::String)
                .with_default("main")
                .with_category("init"),
        );

    let kitty = Config::new("kitty", Format::Custom)
        .with_config_path("~/.config/kitty/kitty.conf")
        .with_setting(Setting::new("font_family", SettingType::String).with_default("monospace"))
        .with_setting(Setting::new("font_size", SettingType::Number).with_default(11.0))
        .with_setting(
            Setting::new("cursor_shape", SettingType::Choice)
                .with_values(["block", "beam", "underline"])
                .with_default("block"),
        )
        .with_setting(Setting::new("scrollback_lines", SettingType::Number).with_default(2000))
        .with_setting(Setting::new("background", SettingType::String).with_default("#000000"))
        .with_setting(Setting::new("foreground", SettingType::String).with_default("#dddddd"))
        .with_setting(Setting::new("enable_audio_bell", SettingType::Boolean).with_default(true));

    [tmux, git, kitty]
        .into_iter()
        .map(|config| (config.app.clone(), config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SettingValue;

    #[test]
    fn standard_cli_table() {
        let catalog = Catalog::standard();

        let ghostty = &catalog.commands["ghostty"];
        assert_eq!(ghostty.location(), "ghostty +show-config --default --docs");
        assert_eq!(ghostty.timeout, Duration::from_secs(10));
        assert!((ghostty.confidence - 0.95).abs() < f64::EPSILON);

        let tmux = &catalog.commands["tmux"];
        assert_eq!(tmux.args, vec!["show-options", "-g"]);
        assert_eq!(tmux.parser, OutputParser::Tmux);
        assert_eq!(catalog.commands.len(), 5);
    }

    #[test]
    fn standard_repository_table() {
        let catalog = Catalog::standard();

        let names: Vec<_> = catalog.repositories.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["alacritty", "neovim", "tmux", "wezterm", "zed"]);
        assert_eq!(catalog.repositories["zed"].paths[0], "assets/settings/default.json");
    }

    #[test]
    fn standard_builtin_configs() {
        let catalog = Catalog::standard();

        let tmux = &catalog.builtin["tmux"];
        assert_eq!(
            tmux.get("prefix").unwrap().default,
            Some(SettingValue::from("C-b"))
        );
        assert_eq!(
            catalog.builtin["git"].get("init.defaultBranch").unwrap().default,
            Some(SettingValue::from("main"))
        );
        assert!(catalog.builtin.contains_key("kitty"));
    }

    #[test]
    fn default_catalog_has_no_entries() {
        let catalog = Catalog::default();

        assert!(catalog.commands.is_empty());
        assert!(catalog.aliases.is_empty());
    }
}
