//! Tests for command execution.

use std::time::Duration;

use super::{CommandRunner, RunError, RunOutput, TokioRunner};

mod run_output {
    use super::*;

    #[test]
    fn combined_joins_both_streams() {
        assert_eq!(RunOutput::new("out", "err").combined(), "out\nerr");
    }

    #[test]
    fn combined_skips_empty_streams() {
        assert_eq!(RunOutput::new("out", "").combined(), "out");
        assert_eq!(RunOutput::new("", "err").combined(), "err");
        assert_eq!(RunOutput::default().combined(), "");
    }
}

#[cfg(unix)]
mod tokio_runner {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn captures_stdout_and_stderr() {
        let output = TokioRunner::new()
            .run("sh", &sh("echo out; echo err >&2"), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[tokio::test]
    async fn non_zero_exit_reports_code_and_stderr() {
        let err = TokioRunner::new()
            .run("sh", &sh("echo broken >&2; exit 3"), Duration::from_secs(5))
            .await
            .unwrap_err();

        match err {
            RunError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("Expected NonZeroExit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let err = TokioRunner::new()
            .run("cfgprobe-no-such-program", &[], Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Spawn { .. }));
    }

    #[tokio::test]
    async fn slow_program_times_out() {
        let err = TokioRunner::new()
            .run("sleep", &["5".to_string()], Duration::from_millis(50))
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Timeout { timeout, .. } if timeout == Duration::from_millis(50)));
    }
}
