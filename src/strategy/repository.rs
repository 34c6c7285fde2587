//! Extraction from defaults published in an app's source repository.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{Catalog, RepoSource, Strategy, StrategyError};
use crate::fetch::{HttpClient, HttpError, HttpRequest, ReqwestClient};
use crate::parse::parse_document;
use crate::schema::{Config, ExtractionSource};

const NAME: &str = "repository";

/// Raw file host the default URLs point at.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Branches tried for each path, in order.
const BRANCHES: [&str; 2] = ["main", "master"];

/// Fetches well-known default config files over HTTP.
///
/// For each path in the app's [`RepoSource`], `main` is tried before
/// `master`; the first path that downloads and yields settings wins.
///
/// # Type Parameters
///
/// - `H`: HTTP client (defaults to [`ReqwestClient`])
#[derive(Debug)]
pub struct RepositoryStrategy<H = ReqwestClient> {
    client: H,
    repos: BTreeMap<String, RepoSource>,
    config_paths: BTreeMap<String, String>,
    base_url: String,
    user_agent: String,
}

impl<H: HttpClient> RepositoryStrategy<H> {
    /// Creates a strategy using `client`.
    #[must_use]
    pub fn new(catalog: &Catalog, client: H) -> Self {
        Self {
            client,
            repos: catalog.repositories.clone(),
            config_paths: catalog.config_paths.clone(),
            base_url: RAW_CONTENT_BASE.to_string(),
            user_agent: concat!("cfgprobe/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Overrides the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Points at a mirror of the raw content host.
    #[must_use]
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into().trim_end_matches('/').to_string();
        self
    }

    fn raw_url(
        &self,
        source: &RepoSource,
        branch: &str,
        path: &str,
    ) -> Result<url::Url, HttpError> {
        let raw = format!(
            "{}/{}/{}/{branch}/{path}",
            self.base_url, source.owner, source.repo
        );
        url::Url::parse(&raw).map_err(|e| HttpError::InvalidUrl(format!("{raw}: {e}")))
    }

    async fn fetch(
        &self,
        source: &RepoSource,
        branch: &str,
        path: &str,
    ) -> Result<String, StrategyError> {
        let url = self.raw_url(source, branch, path)?;
        let request = HttpRequest::get(url.clone()).with_user_agent(&self.user_agent);

        let response = self.client.request(request).await?;
        if !response.is_success() {
            return Err(StrategyError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.text())
    }

    /// Downloads `path` from the first branch that has it, then parses it.
    async fn extract_path(
        &self,
        app: &str,
        source: &RepoSource,
        path: &str,
    ) -> Result<Config, StrategyError> {
        let mut last_err = None;
        for branch in BRANCHES {
            match self.fetch(source, branch, path).await {
                Ok(text) => {
                    let location = format!("{}/{}/{path}", source.owner, source.repo);
                    let config = parse_document(app, path, &text, source.format);
                    if config.is_empty() {
                        return Err(StrategyError::Parse { location });
                    }
                    return Ok(config.with_source(ExtractionSource::new(
                        NAME,
                        location,
                        source.confidence,
                    )));
                }
                Err(e) => {
                    tracing::debug!(app, branch, path, error = %e, "Repository fetch failed");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| StrategyError::NotFound {
            strategy: NAME,
            app: app.to_string(),
        }))
    }
}

#[async_trait]
impl<H: HttpClient> Strategy for RepositoryStrategy<H> {
    fn name(&self) -> &str {
        NAME
    }

    fn can_extract(&self, app: &str) -> bool {
        self.repos.contains_key(app)
    }

    fn priority(&self) -> i32 {
        50
    }

    async fn extract(&self, app: &str) -> Result<Config, StrategyError> {
        let source = self
            .repos
            .get(app)
            .ok_or_else(|| StrategyError::NotConfigured {
                strategy: NAME,
                app: app.to_string(),
            })?;

        let mut last_err = None;
        for path in &source.paths {
            match self.extract_path(app, source, path).await {
                Ok(config) => {
                    let config = match self.config_paths.get(app) {
                        Some(p) => config.with_config_path(p.as_str()),
                        None => config,
                    };
                    return Ok(config);
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(last_err.unwrap_or_else(|| StrategyError::NotFound {
            strategy: NAME,
            app: app.to_string(),
        }))
    }

    fn apps(&self) -> Vec<String> {
        self.repos.keys().cloned().collect()
    }
}
