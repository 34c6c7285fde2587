//! Hand-authored fallback configs.

use std::collections::BTreeMap;
use std::time::SystemTime;

use async_trait::async_trait;

use super::{Catalog, Strategy, StrategyError};
use crate::schema::{Config, ExtractionSource};

const NAME: &str = "builtin";
const CONFIDENCE: f64 = 0.60;

/// Serves the catalog's fixed configs. Never fails for apps it knows.
#[derive(Debug, Clone)]
pub struct BuiltinStrategy {
    configs: BTreeMap<String, Config>,
}

impl BuiltinStrategy {
    /// Creates a strategy serving `catalog.builtin`.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            configs: catalog.builtin.clone(),
        }
    }
}

#[async_trait]
impl Strategy for BuiltinStrategy {
    fn name(&self) -> &str {
        NAME
    }

    fn can_extract(&self, app: &str) -> bool {
        self.configs.contains_key(app)
    }

    fn priority(&self) -> i32 {
        10
    }

    async fn extract(&self, app: &str) -> Result<Config, StrategyError> {
        let mut config = self
            .configs
            .get(app)
            .cloned()
            .ok_or_else(|| StrategyError::NotConfigured {
                strategy: NAME,
                app: app.to_string(),
            })?;

        config.timestamp = SystemTime::now();
        Ok(config.with_source(ExtractionSource::new(
            NAME,
            format!("builtin:{app}"),
            CONFIDENCE,
        )))
    }

    fn apps(&self) -> Vec<String> {
        self.configs.keys().cloned().collect()
    }
}
