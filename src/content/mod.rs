//! Static content model
//!
//! The documentation tree and template catalog are loaded once at startup
//! from JSON files and are immutable for the lifetime of the process. The
//! builders that produce these files from raw documentation sources live
//! outside this server.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SiteError;

/// Reserved category value marking top-level, uncategorized entries.
///
/// Groups carrying this category render as flat links in the sidebar with
/// no collapsible section.
pub const ROOT_FALLBACK_CATEGORY: &str = "root";

/// A leaf entry in the documentation sidebar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeafItem {
    /// URL slug, unique within the enclosing list only
    pub slug: String,

    /// Display label
    pub title: String,

    /// Marks the group's default/landing page; its href omits the slug.
    /// At most one entry per group may set this.
    #[serde(default)]
    pub index: bool,
}

/// A category section of the documentation sidebar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryGroup {
    /// Category identifier, unique within the tree except for
    /// [`ROOT_FALLBACK_CATEGORY`]
    pub category: String,

    /// Slug of the category's own landing item
    pub slug: String,

    /// Display label
    pub title: String,

    /// Ordered leaf entries
    #[serde(default)]
    pub list: Vec<LeafItem>,
}

/// Ordered documentation sidebar tree
pub type ContentTree = Vec<CategoryGroup>;

/// Framework facet of a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Framework {
    /// Framework name, grouped case-sensitively
    pub name: String,

    /// Logo asset reference
    pub avatar: String,
}

/// Category facet of a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Category name, grouped case-sensitively
    pub name: String,
}

/// A repository contributor
///
/// The GitHub API reports the field as `login`; older catalog files carry
/// `name` directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contributor {
    /// Contributor display name
    #[serde(alias = "login")]
    pub name: String,

    /// Avatar image URL
    pub avatar_url: String,
}

/// Source repository reference of a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub slug: String,

    /// Web URL of the repository
    pub html_url: String,

    /// Contributors in source order; the first, if any, is treated as the
    /// attributed author
    #[serde(default)]
    pub contributors: Vec<Contributor>,
}

impl Repository {
    /// `owner/slug` identifier used by the GitHub API
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}/{}", self.owner, self.slug)
    }
}

/// A catalog entry in the template gallery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description shown on cards and matched by search
    pub description: String,

    /// URL slug of the detail page
    pub slug: String,

    /// Banner image asset reference
    pub banner: String,

    /// Live demo URL, when one exists
    #[serde(default)]
    pub demo_url: Option<String>,

    /// Framework facet
    pub framework: Framework,

    /// Category facet
    pub category: Category,

    /// Source repository, when published
    #[serde(default)]
    pub repository: Option<Repository>,
}

/// Gallery page copy loaded from the settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Gallery eyebrow title
    pub title: String,

    /// Gallery heading
    pub sub_title: String,

    /// Gallery description paragraph
    pub description: String,

    /// Call-to-action label
    pub cta_label: String,

    /// Call-to-action target URL
    pub cta_target_url: String,
}

/// Load the documentation sidebar tree from a JSON file
///
/// # Errors
///
/// Returns [`SiteError`] if the file cannot be read or parsed.
pub fn load_tree(path: impl AsRef<Path>) -> Result<ContentTree, SiteError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let tree: ContentTree = serde_json::from_str(&raw)?;
    tracing::debug!(groups = tree.len(), "Loaded documentation tree");
    Ok(tree)
}

/// Load the template catalog from a JSON file
///
/// # Errors
///
/// Returns [`SiteError`] if the file cannot be read or parsed.
pub fn load_templates(path: impl AsRef<Path>) -> Result<Vec<Template>, SiteError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let templates: Vec<Template> = serde_json::from_str(&raw)?;
    tracing::debug!(templates = templates.len(), "Loaded template catalog");
    Ok(templates)
}

/// Load the page settings from a JSON file
///
/// # Errors
///
/// Returns [`SiteError`] if the file cannot be read or parsed.
pub fn load_settings(path: impl AsRef<Path>) -> Result<SiteSettings, SiteError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_parses_from_json() {
        let raw = r#"[
            {
                "category": "root",
                "slug": "faq",
                "title": "FAQ",
                "list": []
            },
            {
                "category": "guides",
                "slug": "guides",
                "title": "Guides",
                "list": [
                    { "slug": "guides", "title": "Overview", "index": true },
                    { "slug": "deploy", "title": "Deploying" }
                ]
            }
        ]"#;

        let tree: ContentTree = serde_json::from_str(raw).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].category, ROOT_FALLBACK_CATEGORY);
        assert!(tree[1].list[0].index);
        assert!(!tree[1].list[1].index);
    }

    #[test]
    fn test_at_most_one_index_leaf_in_fixture() {
        let tree = load_tree("./content/docs_tree.json").unwrap();
        for group in &tree {
            let index_count = group.list.iter().filter(|leaf| leaf.index).count();
            assert!(index_count <= 1, "group {} has {index_count} index leaves", group.category);
        }
    }

    #[test]
    fn test_template_parses_with_optional_repository() {
        let raw = r#"{
            "id": "t1",
            "name": "Minimal Blog",
            "description": "A starter blog",
            "slug": "minimal-blog",
            "banner": "/images/minimal-blog.png",
            "framework": { "name": "Astro", "avatar": "/svg/astro.svg" },
            "category": { "name": "Blog" }
        }"#;

        let template: Template = serde_json::from_str(raw).unwrap();
        assert!(template.repository.is_none());
        assert!(template.demo_url.is_none());
    }

    #[test]
    fn test_contributor_accepts_login_alias() {
        let raw = r#"{ "login": "octocat", "avatar_url": "https://example.com/a.png" }"#;
        let contributor: Contributor = serde_json::from_str(raw).unwrap();
        assert_eq!(contributor.name, "octocat");
    }

    #[test]
    fn test_repository_identifier() {
        let repo = Repository {
            owner: "acme".to_string(),
            slug: "starter".to_string(),
            html_url: "https://github.com/acme/starter".to_string(),
            contributors: vec![],
        };
        assert_eq!(repo.identifier(), "acme/starter");
    }

    #[test]
    fn test_catalog_fixture_ids_are_unique() {
        let templates = load_templates("./content/templates.json").unwrap();
        let mut ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), templates.len());
    }
}
