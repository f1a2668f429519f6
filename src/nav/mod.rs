//! Navigation resolver
//!
//! Derives, from the documentation tree and the current URL path, which
//! sidebar category is open and which leaf item is active. All functions
//! here are pure; the sidebar template consumes their results.
//!
//! Path decomposition follows a fixed ladder: split on `/`, drop empty
//! segments, then
//!
//! - more than two segments: category is `segments[1]`, slug `segments[2]`
//! - exactly two segments: slug is `segments[1]`, category via [`find_base`]
//! - one segment: slug is `segments[0]`, category via [`find_base`]
//! - zero segments: nothing is active

use crate::content::{CategoryGroup, LeafItem, ROOT_FALLBACK_CATEGORY};

/// Resolved navigation state for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLocation {
    /// Category owning the active item, or the sentinel for top-level items
    pub active_category: Option<String>,

    /// Slug of the active item
    pub active_slug: Option<String>,

    /// True on the documentation landing page
    pub is_home: bool,
}

impl NavLocation {
    fn empty() -> Self {
        Self {
            active_category: None,
            active_slug: None,
            is_home: false,
        }
    }
}

/// Base-category fallback for paths with at most two segments.
///
/// The root `docs` segment maps to the sentinel category; a lone non-root
/// segment maps to the literal `"docs"`. These two branches are reachable
/// under different path shapes and are intentionally kept separate.
#[must_use]
pub fn find_base(segments: &[&str]) -> String {
    if segments.first() == Some(&"docs") {
        return ROOT_FALLBACK_CATEGORY.to_string();
    }

    if segments.len() == 1 {
        return "docs".to_string();
    }

    segments[1].to_string()
}

/// Resolve the active category and slug for a URL path
#[must_use]
pub fn resolve(path: &str) -> NavLocation {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        return NavLocation::empty();
    }

    let active_category = if segments.len() > 2 {
        segments[1].to_string()
    } else {
        find_base(&segments)
    };

    let active_slug = if segments.len() > 2 {
        segments[2]
    } else if segments.len() == 2 {
        segments[1]
    } else {
        segments[0]
    };

    NavLocation {
        is_home: active_slug == "docs",
        active_category: Some(active_category),
        active_slug: Some(active_slug.to_string()),
    }
}

/// Whether a sidebar group renders expanded.
///
/// Sentinel groups render as flat links and are never collapsible. On wide
/// viewports every collapsible group is open; on narrow viewports only the
/// group owning the active category is open.
#[must_use]
pub fn is_group_open(group: &CategoryGroup, loc: &NavLocation, is_narrow: bool) -> bool {
    if group.category == ROOT_FALLBACK_CATEGORY {
        return false;
    }

    if !is_narrow {
        return true;
    }

    loc.active_category.as_deref() == Some(group.category.as_str())
}

/// Whether a leaf link inside a collapsible group carries the active style
#[must_use]
pub fn is_leaf_active(group: &CategoryGroup, leaf: &LeafItem, loc: &NavLocation) -> bool {
    loc.active_category.as_deref() == Some(group.category.as_str())
        && loc.active_slug.as_deref() == Some(leaf.slug.as_str())
}

/// Href of a leaf link. The group's index leaf collapses into the category
/// URL and omits its own slug.
#[must_use]
pub fn leaf_href(group: &CategoryGroup, leaf: &LeafItem) -> String {
    if leaf.index {
        format!("/docs/{}", group.category)
    } else {
        format!("/docs/{}/{}", group.category, leaf.slug)
    }
}

/// DOM anchor id the sidebar should scroll into view, if anything is active.
///
/// Pure and idempotent; the template emits the id and a small client script
/// performs the scroll. With no active item there is nothing to scroll to.
#[must_use]
pub fn scroll_anchor(loc: &NavLocation) -> Option<String> {
    loc.active_slug.as_deref().map(|slug| format!("menu-{slug}"))
}
