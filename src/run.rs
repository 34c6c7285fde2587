//! Subcommand execution.
//!
//! Builds the engine from validated configuration and renders results as
//! JSON on stdout.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use cfgprobe::cache::ConfigCache;
use cfgprobe::config::{Command, ValidatedConfig};
use cfgprobe::engine::{Engine, ExtractError};
use cfgprobe::fetch::ReqwestClient;
use cfgprobe::schema::Config;
use cfgprobe::strategy::{
    BuiltinStrategy, Catalog, CliStrategy, LocalStrategy, RepositoryStrategy,
};
use cfgprobe::validate::{ValidationResult, Validator};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Extraction produced no config.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Failed to serialize output.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write output.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    app: &'a str,
    #[serde(flatten)]
    result: ValidationResult,
}

/// Executes `command` and writes its output to stdout.
///
/// # Errors
///
/// Returns an error if a single-app extraction fails or output cannot be
/// written. Batch extraction never fails.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it writes to the real
/// stdout and may spawn processes and reach the network.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: Command, config: &ValidatedConfig) -> Result<(), RunError> {
    let catalog = Catalog::standard();
    let engine = build_engine(config, &catalog);
    tracing::debug!(strategies = ?engine.strategy_names(), "Engine ready");

    let sweeper = engine.cache().spawn_sweeper(config.sweep_interval);
    let result = run_command(&engine, command, &mut io::stdout()).await;
    sweeper.abort();

    result
}

/// Creates the engine with every strategy the configuration enables.
fn build_engine(config: &ValidatedConfig, catalog: &Catalog) -> Engine {
    let cache = Arc::new(ConfigCache::new(config.cache_capacity, config.cache_ttl));

    let mut builder = Engine::builder()
        .catalog(catalog)
        .cache(cache)
        .timeout(config.timeout)
        .concurrency(config.concurrency)
        .strategy(Arc::new(CliStrategy::new(catalog)))
        .strategy(Arc::new(LocalStrategy::new(catalog, &config.local_dir)))
        .strategy(Arc::new(BuiltinStrategy::new(catalog)));

    if config.repository.enabled {
        let client = ReqwestClient::new().with_max_body_bytes(config.repository.max_body_bytes);
        let mut repository = RepositoryStrategy::new(catalog, client);
        if let Some(ref agent) = config.repository.user_agent {
            repository = repository.with_user_agent(agent);
        }
        builder = builder.strategy(Arc::new(repository));
    } else {
        tracing::info!("Network disabled, skipping repository strategy");
    }

    builder.build()
}

async fn run_command<W: Write>(
    engine: &Engine,
    command: Command,
    out: &mut W,
) -> Result<(), RunError> {
    match command {
        Command::Extract { app } => {
            let config = engine.extract(&app).await?;
            write_json(out, &*config)
        }
        Command::Batch { apps } => {
            let apps = if apps.is_empty() {
                engine.supported_apps()
            } else {
                apps
            };
            let configs = engine.extract_batch(&apps).await;
            let sorted: BTreeMap<&str, &Config> = configs
                .iter()
                .map(|(app, config)| (app.as_str(), config.as_ref()))
                .collect();
            write_json(out, &sorted)
        }
        Command::Apps => {
            for app in engine.supported_apps() {
                writeln!(out, "{app}")?;
            }
            Ok(())
        }
        Command::Validate { app } => {
            let config = engine.extract(&app).await?;
            let result = Validator::with_default_rules().validate_config(&config);
            if !result.valid {
                tracing::warn!(app = %config.app, errors = result.errors.len(), "Validation failed");
            }
            write_json(
                out,
                &ValidationReport {
                    app: &config.app,
                    result,
                },
            )
        }
        // Handled before the runtime starts
        Command::Init { .. } => Ok(()),
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
