//! Documentation pages
//!
//! Renders the docs layout with the sidebar derived from the content tree
//! and the request path. The sidebar view model is computed here with the
//! pure functions from [`crate::nav`]; the template only interpolates.

use askama::Template;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::Html;
use serde::Deserialize;

use crate::content::ROOT_FALLBACK_CATEGORY;
use crate::error::SiteError;
use crate::handlers::render;
use crate::nav::{self, NavLocation};
use crate::state::SiteState;

/// Viewport hint carried by the sidebar's htmx refresh
#[derive(Debug, Default, Deserialize)]
pub struct DocsQuery {
    /// True below the breakpoint where sections default to closed
    #[serde(default)]
    pub narrow: bool,
}

/// A single sidebar link
struct SidebarLink {
    title: String,
    href: String,
    anchor: String,
    active: bool,
}

/// One sidebar section
struct SidebarGroup {
    title: String,
    href: String,
    anchor: String,
    /// Sentinel-category groups render as flat links
    flat: bool,
    open: bool,
    active: bool,
    items: Vec<SidebarLink>,
}

#[derive(Template)]
#[template(path = "docs.html")]
struct DocsTemplate {
    page_title: String,
    is_home: bool,
    groups: Vec<SidebarGroup>,
    scroll_target: Option<String>,
}

/// `GET /docs` and `GET /docs/{*path}`
pub async fn docs_page(
    State(state): State<SiteState>,
    Query(query): Query<DocsQuery>,
    uri: Uri,
) -> Result<Html<String>, SiteError> {
    let loc = nav::resolve(uri.path());

    tracing::debug!(
        path = %uri.path(),
        category = ?loc.active_category,
        slug = ?loc.active_slug,
        narrow = query.narrow,
        "Rendering docs page"
    );

    let groups = state
        .tree
        .iter()
        .map(|group| {
            if group.category == ROOT_FALLBACK_CATEGORY {
                SidebarGroup {
                    title: group.title.clone(),
                    href: format!("/docs/{}", group.slug),
                    anchor: format!("menu-{}", group.slug),
                    flat: true,
                    open: false,
                    active: loc.active_slug.as_deref() == Some(group.slug.as_str()),
                    items: Vec::new(),
                }
            } else {
                SidebarGroup {
                    title: group.title.clone(),
                    href: format!("/docs/{}", group.slug),
                    // Distinct from the index leaf's anchor, which shares the slug
                    anchor: format!("menu-group-{}", group.slug),
                    flat: false,
                    open: nav::is_group_open(group, &loc, query.narrow),
                    active: loc.active_slug.as_deref() == Some(group.slug.as_str())
                        && loc.active_category.as_deref() == Some(group.category.as_str()),
                    items: group
                        .list
                        .iter()
                        .map(|leaf| SidebarLink {
                            title: leaf.title.clone(),
                            href: nav::leaf_href(group, leaf),
                            anchor: format!("menu-{}", leaf.slug),
                            active: nav::is_leaf_active(group, leaf, &loc),
                        })
                        .collect(),
                }
            }
        })
        .collect();

    render(&DocsTemplate {
        page_title: page_title(&state, &loc),
        is_home: loc.is_home,
        groups,
        scroll_target: nav::scroll_anchor(&loc),
    })
}

/// Heading for the main column: the active item's title when it is in the
/// tree, otherwise a generic landing heading.
fn page_title(state: &SiteState, loc: &NavLocation) -> String {
    if loc.is_home {
        return "Getting started".to_string();
    }

    let Some(slug) = loc.active_slug.as_deref() else {
        return "Documentation".to_string();
    };

    for group in state.tree.iter() {
        if group.slug == slug {
            return group.title.clone();
        }
        for leaf in &group.list {
            if leaf.slug == slug && loc.active_category.as_deref() == Some(group.category.as_str())
            {
                return leaf.title.clone();
            }
        }
    }

    "Documentation".to_string()
}
