//! Application state
//!
//! Static content is loaded once at startup and held behind `Arc`s; every
//! handler sees the same immutable tree and catalog. Only the GitHub cache
//! and the rate limiter hold mutable state, each behind its own lock.

use std::sync::Arc;
use std::time::Instant;

use crate::config::SiteConfig;
use crate::content::{self, ContentTree, SiteSettings, Template};
use crate::github::RepoClient;
use crate::support::ZendeskClient;

/// Shared application state, cheap to clone
#[derive(Clone)]
pub struct SiteState {
    /// Loaded configuration
    pub config: Arc<SiteConfig>,

    /// Documentation sidebar tree
    pub tree: Arc<ContentTree>,

    /// Template catalog
    pub templates: Arc<Vec<Template>>,

    /// Page copy
    pub settings: Arc<SiteSettings>,

    /// GitHub metadata client with per-identifier cache
    pub repos: RepoClient,

    /// Helpdesk client
    pub zendesk: ZendeskClient,

    /// Process start time, reported by `/health`
    pub started_at: Instant,
}

impl SiteState {
    /// Build state by loading static content from the configured paths.
    ///
    /// # Errors
    ///
    /// Returns an error if required support settings are missing or a
    /// content file cannot be loaded.
    pub fn from_config(config: SiteConfig) -> anyhow::Result<Self> {
        config.support.validate()?;

        let tree = content::load_tree(&config.content.docs_tree)?;
        let templates = content::load_templates(&config.content.templates)?;
        let settings = content::load_settings(&config.content.settings)?;

        tracing::info!(
            groups = tree.len(),
            templates = templates.len(),
            "Content loaded"
        );

        Ok(Self::from_parts(config, tree, templates, settings))
    }

    /// Build state from in-memory content, bypassing the filesystem.
    /// Used by tests and embedding callers.
    #[must_use]
    pub fn from_parts(
        config: SiteConfig,
        tree: ContentTree,
        templates: Vec<Template>,
        settings: SiteSettings,
    ) -> Self {
        let repos = RepoClient::new(config.github.clone());
        let zendesk = ZendeskClient::new(&config.support);

        Self {
            config: Arc::new(config),
            tree: Arc::new(tree),
            templates: Arc::new(templates),
            settings: Arc::new(settings),
            repos,
            zendesk,
            started_at: Instant::now(),
        }
    }
}
