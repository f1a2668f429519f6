//! GitHub repository metadata client
//!
//! Enriches a template's repository block with a contributor list. Results
//! are cached per identifier so a repeat render does not refetch; there is
//! no retry. A failed contributors fetch degrades to an empty list rather
//! than failing the page.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::GithubSettings;
use crate::content::Contributor;

/// Repository metadata as returned by the GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    /// `owner/name` form
    pub full_name: String,

    /// Web URL of the repository
    pub html_url: String,

    /// Contributors listing endpoint
    pub contributors_url: String,

    /// Contributors in API order; populated by a secondary fetch when the
    /// repo payload does not carry them
    #[serde(default)]
    pub contributors: Option<Vec<Contributor>>,
}

/// Errors from the repository metadata fetch
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// Transport-level failure
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("GitHub returned HTTP {status} for {repo}")]
    Status {
        /// HTTP status code
        status: reqwest::StatusCode,
        /// Repository identifier
        repo: String,
    },
}

/// Caching GitHub metadata client
///
/// Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct RepoClient {
    http: reqwest::Client,
    settings: GithubSettings,
    cache: Arc<RwLock<HashMap<String, Repo>>>,
}

impl RepoClient {
    /// Create a new client
    #[must_use]
    pub fn new(settings: GithubSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch repository metadata for an `owner/name` identifier.
    ///
    /// A cached result short-circuits the upstream call. When the repo
    /// payload lacks contributors, a secondary fetch fills them in; its
    /// failure logs and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the primary repo fetch fails; callers
    /// render without the repository block in that case.
    pub async fn fetch_repo(&self, repo: &str) -> Result<Repo, GithubError> {
        if let Some(cached) = self.cache.read().await.get(repo) {
            tracing::debug!(repo = %repo, "Repository metadata cache hit");
            return Ok(cached.clone());
        }

        let url = format!("{}/repos/{repo}", self.settings.api_base);
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.settings.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GithubError::Status {
                status: response.status(),
                repo: repo.to_string(),
            });
        }

        let mut data: Repo = response.json().await?;

        if data.contributors.is_none() {
            data.contributors = Some(self.fetch_contributors(repo, &data.contributors_url).await);
        }

        self.cache
            .write()
            .await
            .insert(repo.to_string(), data.clone());

        Ok(data)
    }

    /// Secondary contributors fetch; never fails the caller
    async fn fetch_contributors(&self, repo: &str, url: &str) -> Vec<Contributor> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.settings.user_agent)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<Vec<Contributor>>().await {
                    Ok(contributors) => contributors,
                    Err(error) => {
                        tracing::error!(repo = %repo, error = %error, "Failed to parse contributors");
                        Vec::new()
                    }
                }
            }
            Ok(response) => {
                tracing::error!(repo = %repo, status = %response.status(), "Failed to fetch contributors");
                Vec::new()
            }
            Err(error) => {
                tracing::error!(repo = %repo, error = %error, "Failed to fetch contributors");
                Vec::new()
            }
        }
    }
}
