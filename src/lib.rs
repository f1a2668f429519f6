//! docsite: documentation and template-gallery website server
//!
//! Serves a documentation section with a collapsible sidebar, a template
//! gallery with faceted filtering, template detail pages enriched with
//! GitHub repository metadata, and a small rate-limited support API that
//! proxies ticket creation to a helpdesk service.
//!
//! # Design Principles
//!
//! 1. **Pure derivations**: navigation resolution and catalog filtering are
//!    synchronous pure functions of immutable content plus transient request
//!    state. They own no mutable state and are unit-testable in isolation.
//! 2. **Hypermedia-first**: pages render server-side with Askama; HTMX
//!    requests receive partial responses for filter changes.
//! 3. **Degrade gracefully**: upstream fetch failures (GitHub, helpdesk)
//!    never break page rendering; they log and fall back.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docsite::{config::SiteConfig, handlers, observability, state::SiteState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     observability::init()?;
//!
//!     let config = SiteConfig::load()?;
//!     let state = SiteState::from_config(config)?;
//!
//!     let app = handlers::router(state);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod extractors;
pub mod github;
pub mod handlers;
pub mod middleware;
pub mod nav;
pub mod observability;
pub mod state;
pub mod support;

pub mod prelude {
    //! Convenience re-exports for common types

    pub use crate::catalog::{FilterSelection, count_categories, count_frameworks, filter_templates};
    pub use crate::config::SiteConfig;
    pub use crate::content::{CategoryGroup, ContentTree, LeafItem, Template, ROOT_FALLBACK_CATEGORY};
    pub use crate::error::SiteError;
    pub use crate::github::RepoClient;
    pub use crate::nav::{NavLocation, is_group_open, leaf_href, resolve};
    pub use crate::state::SiteState;
}
