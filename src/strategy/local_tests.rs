//! Tests for the local file strategy.

use std::fs;

use super::{Catalog, LocalStrategy, Strategy, StrategyError};
use crate::schema::{Format, SettingValue};

fn strategy(dir: &std::path::Path) -> LocalStrategy {
    LocalStrategy::new(&Catalog::standard(), dir)
}

mod discovery {
    use super::*;

    #[test]
    fn can_extract_only_when_a_candidate_exists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("alacritty.yml"), "font_size: 11").unwrap();
        let strategy = strategy(dir.path());

        assert!(strategy.can_extract("alacritty"));
        assert!(!strategy.can_extract("zed"));
        assert_eq!(strategy.name(), "local");
        assert_eq!(strategy.priority(), 75);
    }

    #[test]
    fn apps_lists_supported_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zed.json"), "").unwrap();
        fs::write(dir.path().join("tmux.conf"), "").unwrap();
        fs::write(dir.path().join("zed.yaml"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::create_dir(dir.path().join("kitty.toml")).unwrap();

        assert_eq!(strategy(dir.path()).apps(), vec!["tmux", "zed"]);
    }

    #[test]
    fn apps_of_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        assert!(strategy(&dir.path().join("absent")).apps().is_empty());
    }
}

mod extract {
    use super::*;

    #[tokio::test]
    async fn reads_file_and_stamps_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alacritty.yml");
        fs::write(&path, "# comment\nfont_size: 11\nlive_reload: true\n").unwrap();

        let config = strategy(dir.path()).extract("alacritty").await.unwrap();

        assert_eq!(config.format, Format::Yaml);
        assert_eq!(config.source.method, "local");
        assert_eq!(config.source.location, path.display().to_string());
        assert_eq!(config.config_path, path.display().to_string());
        assert!((config.source.confidence - 0.85).abs() < f64::EPSILON);
        assert_eq!(
            config.get("live_reload").unwrap().default,
            Some(SettingValue::Bool(true))
        );
    }

    #[tokio::test]
    async fn earlier_extension_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zed.json"), "\"from\": \"json\"").unwrap();
        fs::write(dir.path().join("zed.yaml"), "from: yaml").unwrap();

        let config = strategy(dir.path()).extract("zed").await.unwrap();

        assert_eq!(config.format, Format::Json);
        assert_eq!(
            config.get("from").unwrap().default,
            Some(SettingValue::from("yaml"))
        );
    }

    #[tokio::test]
    async fn conf_files_use_catalog_format() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tmux.conf"), "set-option -g mouse on").unwrap();

        let config = strategy(dir.path()).extract("tmux").await.unwrap();

        assert_eq!(config.format, Format::Flags);
        assert!(config.get("set-option").is_some());
    }

    #[tokio::test]
    async fn unknown_apps_are_custom() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ghostty.conf"), "font-size = 12").unwrap();

        let config = strategy(dir.path()).extract("ghostty").await.unwrap();

        assert_eq!(config.format, Format::Custom);
        assert_eq!(
            config.get("font-size").unwrap().default,
            Some(SettingValue::Number(12.0))
        );
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let err = strategy(dir.path()).extract("zed").await.unwrap_err();

        assert!(matches!(err, StrategyError::NotFound { strategy: "local", .. }));
    }

    #[tokio::test]
    async fn comment_only_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zed.json"), "// nothing\n").unwrap();

        let err = strategy(dir.path()).extract("zed").await.unwrap_err();

        assert!(matches!(err, StrategyError::Parse { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_candidate_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("zed.yaml")).unwrap();

        let err = strategy(dir.path()).extract("zed").await.unwrap_err();

        assert!(matches!(err, StrategyError::Io { .. }));
    }
}
