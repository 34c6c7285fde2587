//! Tests for batch extraction.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use super::{Engine, ExtractError};
use crate::strategy::Catalog;
use crate::test_fixtures::ScriptedStrategy;

#[tokio::test]
async fn partial_failure_is_reported_per_app() {
    let cli = Arc::new(ScriptedStrategy::succeeding("cli", 100, &["tmux", "git"]));
    let broken = Arc::new(ScriptedStrategy::failing("local", 75, &["zed"]));
    let engine = Engine::builder()
        .strategy(cli.clone())
        .strategy(broken.clone())
        .build();

    let report = engine
        .extract_batch_report(&["tmux", "git", "zed", "notepad"])
        .await;

    assert_eq!(report.len(), 4);
    assert!(report.configs.contains_key("tmux"));
    assert!(report.configs.contains_key("git"));
    assert!(matches!(report.errors["zed"], ExtractError::AllFailed { .. }));
    assert!(matches!(
        report.errors["notepad"],
        ExtractError::Unsupported { .. }
    ));
}

#[tokio::test]
async fn extract_batch_keeps_only_successes() {
    let cli = Arc::new(ScriptedStrategy::succeeding("cli", 100, &["tmux"]));
    let engine = Engine::builder().strategy(cli.clone()).build();

    let configs = engine
        .extract_batch(&["tmux".to_string(), "zed".to_string()])
        .await;

    assert_eq!(configs.len(), 1);
    assert_eq!(configs["tmux"].app, "tmux");
}

#[tokio::test]
async fn results_keyed_by_requested_name() {
    let neovim = Arc::new(ScriptedStrategy::succeeding("cli", 100, &["neovim"]));
    let engine = Engine::builder()
        .catalog(&Catalog::standard())
        .strategy(neovim.clone())
        .build();

    let configs = engine.extract_batch(&["nvim"]).await;

    assert_eq!(configs["nvim"].app, "neovim");
}

#[tokio::test]
async fn empty_batch_is_empty_report() {
    let engine = Engine::builder().build();
    let apps: [&str; 0] = [];

    let report = engine.extract_batch_report(&apps).await;

    assert!(report.is_empty());
}

#[tokio::test(start_paused = true)]
async fn worker_count_bounds_parallelism() {
    let slow = Arc::new(
        ScriptedStrategy::succeeding("cli", 100, &["a", "b", "c", "d"])
            .with_delay(Duration::from_millis(100)),
    );
    let engine = Engine::builder()
        .strategy(slow.clone())
        .concurrency(2)
        .build();

    let start = Instant::now();
    let configs = engine.extract_batch(&["a", "b", "c", "d"]).await;

    assert_eq!(configs.len(), 4);
    // Two workers, four apps: two rounds
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(200), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(300), "{elapsed:?}");
}

#[tokio::test]
async fn batch_results_populate_cache() {
    let cli = Arc::new(ScriptedStrategy::succeeding("cli", 100, &["tmux"]));
    let engine = Engine::builder().strategy(cli.clone()).build();

    let configs = engine.extract_batch(&["tmux"]).await;
    let again = engine.extract("tmux").await.unwrap();

    assert!(Arc::ptr_eq(&configs["tmux"], &again));
    assert_eq!(cli.calls(), 1);
}

#[tokio::test]
async fn huge_timeout_batch_completes() {
    let cli = Arc::new(ScriptedStrategy::succeeding("cli", 100, &["tmux"]));
    let engine = Engine::builder()
        .strategy(cli.clone())
        .timeout(Duration::from_secs(u64::MAX / 2))
        .build();

    let configs = engine.extract_batch(&["tmux"]).await;

    assert!(configs.contains_key("tmux"));
}
