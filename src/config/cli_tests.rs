//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_extract() {
        let cli = Cli::parse_from_iter(["cfgprobe", "extract", "ghostty"]);

        assert!(matches!(cli.command, Command::Extract { ref app } if app == "ghostty"));
        assert!(!cli.verbose);
        assert!(!cli.no_network);
    }

    #[test]
    fn parse_batch_with_and_without_apps() {
        let some = Cli::parse_from_iter(["cfgprobe", "batch", "tmux", "git"]);
        assert!(matches!(some.command, Command::Batch { ref apps } if apps == &["tmux", "git"]));

        let none = Cli::parse_from_iter(["cfgprobe", "batch"]);
        assert!(matches!(none.command, Command::Batch { ref apps } if apps.is_empty()));
    }

    #[test]
    fn parse_apps_and_validate() {
        let apps = Cli::parse_from_iter(["cfgprobe", "apps"]);
        assert!(matches!(apps.command, Command::Apps));

        let validate = Cli::parse_from_iter(["cfgprobe", "validate", "zed"]);
        assert!(matches!(validate.command, Command::Validate { ref app } if app == "zed"));
    }

    #[test]
    fn parse_global_options() {
        let cli = Cli::parse_from_iter([
            "cfgprobe",
            "--timeout",
            "5",
            "--concurrency",
            "2",
            "--cache-ttl",
            "60",
            "--cache-capacity",
            "10",
            "--local-dir",
            "/srv/configs",
            "--no-network",
            "-v",
            "-c",
            "cfgprobe.toml",
            "apps",
        ]);

        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.concurrency, Some(2));
        assert_eq!(cli.cache_ttl, Some(60));
        assert_eq!(cli.cache_capacity, Some(10));
        assert_eq!(cli.local_dir, Some(PathBuf::from("/srv/configs")));
        assert!(cli.no_network);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("cfgprobe.toml")));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from_iter(["cfgprobe", "extract", "tmux", "--timeout", "3", "-v"]);

        assert_eq!(cli.timeout, Some(3));
        assert!(cli.verbose);
    }

    #[test]
    fn subcommand_is_required() {
        let result = <Cli as clap::Parser>::try_parse_from(["cfgprobe"]);

        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let result = <Cli as clap::Parser>::try_parse_from(["cfgprobe", "--timeout", "soon", "apps"]);

        assert!(result.is_err());
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["cfgprobe", "init"]);

        assert!(cli.is_init());
        assert!(
            matches!(cli.command, Command::Init { ref output } if output == &PathBuf::from("cfgprobe.toml"))
        );
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["cfgprobe", "init", "-o", "/tmp/probe.toml"]);

        assert!(
            matches!(cli.command, Command::Init { ref output } if output == &PathBuf::from("/tmp/probe.toml"))
        );
    }

    #[test]
    fn other_commands_are_not_init() {
        assert!(!Cli::parse_from_iter(["cfgprobe", "apps"]).is_init());
    }
}
