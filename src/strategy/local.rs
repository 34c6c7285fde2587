//! Extraction from a previously materialized copy on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{Catalog, Strategy, StrategyError};
use crate::parse::parse_local;
use crate::schema::{Config, ExtractionSource, Format};

const NAME: &str = "local";
const CONFIDENCE: f64 = 0.85;

/// Extensions tried for `<dir>/<app>.<ext>`, in order.
pub const LOCAL_EXTENSIONS: [&str; 5] = ["yaml", "yml", "json", "toml", "conf"];

/// Reads `<dir>/<app>.<ext>` and parses it with the generic key/value reader.
#[derive(Debug, Clone)]
pub struct LocalStrategy {
    dir: PathBuf,
    formats: BTreeMap<String, Format>,
}

impl LocalStrategy {
    /// Creates a strategy reading from `dir`.
    #[must_use]
    pub fn new(catalog: &Catalog, dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            formats: catalog.local_formats.clone(),
        }
    }

    /// Directory searched for copies.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn format_for(&self, app: &str) -> Format {
        self.formats.get(app).copied().unwrap_or(Format::Custom)
    }

    fn candidates(dir: &Path, app: &str) -> impl Iterator<Item = PathBuf> {
        LOCAL_EXTENSIONS
            .iter()
            .map(move |ext| dir.join(format!("{app}.{ext}")))
    }

    /// Reads the first candidate that exists.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn read_first(dir: &Path, app: &str) -> Result<(PathBuf, String), StrategyError> {
        for path in Self::candidates(dir, app) {
            match std::fs::read_to_string(&path) {
                Ok(text) => return Ok((path, text)),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(StrategyError::Io { path, source }),
            }
        }
        Err(StrategyError::NotFound {
            strategy: NAME,
            app: app.to_string(),
        })
    }
}

#[async_trait]
impl Strategy for LocalStrategy {
    fn name(&self) -> &str {
        NAME
    }

    fn can_extract(&self, app: &str) -> bool {
        Self::candidates(&self.dir, app).any(|path| path.is_file())
    }

    fn priority(&self) -> i32 {
        75
    }

    async fn extract(&self, app: &str) -> Result<Config, StrategyError> {
        let dir = self.dir.clone();
        let name = app.to_string();

        let (path, text) = tokio::task::spawn_blocking(move || Self::read_first(&dir, &name))
            .await
            .expect("spawn_blocking task panicked")?;

        let location = path.display().to_string();
        let config = parse_local(app, &text, self.format_for(app));
        if config.is_empty() {
            return Err(StrategyError::Parse { location });
        }

        Ok(config
            .with_config_path(location.as_str())
            .with_source(ExtractionSource::new(NAME, location, CONFIDENCE)))
    }

    /// Apps with a readable copy in the directory right now.
    fn apps(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut apps: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| LOCAL_EXTENSIONS.contains(&ext))
            })
            .filter_map(|path| path.file_stem()?.to_str().map(ToString::to_string))
            .collect();
        apps.sort();
        apps.dedup();
        apps
    }
}
