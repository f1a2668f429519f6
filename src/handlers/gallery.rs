//! Template gallery and detail pages
//!
//! Selection state lives entirely in query parameters; facet links point at
//! the query that would result from toggling that facet, which gives the
//! radio-with-deselect behavior without client state. HTMX requests receive
//! only the re-rendered grid.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum_htmx::HxRequest;

use crate::catalog::{self, Facet, FilterSelection};
use crate::content::{Contributor, Template as CatalogTemplate};
use crate::error::SiteError;
use crate::handlers::render;
use crate::state::SiteState;

/// One selectable facet value in the filter sidebar
struct FacetView {
    name: String,
    avatar: Option<String>,
    amount: usize,
    active: bool,
    href: String,
}

/// One card in the gallery grid
struct CardView {
    name: String,
    description: String,
    href: String,
    banner: String,
    framework_name: String,
    framework_avatar: String,
    contributor: Option<Contributor>,
}

#[derive(Template)]
#[template(path = "gallery_grid.html")]
struct GalleryGridTemplate {
    cards: Vec<CardView>,
}

#[derive(Template)]
#[template(path = "gallery.html")]
struct GalleryTemplate {
    title: String,
    sub_title: String,
    description: String,
    cta_label: String,
    cta_target_url: String,
    frameworks: Vec<FacetView>,
    categories: Vec<FacetView>,
    search_value: String,
    framework_value: String,
    category_value: String,
    cards: Vec<CardView>,
}

#[derive(Template)]
#[template(path = "template_detail.html")]
struct TemplateDetailTemplate {
    name: String,
    description: String,
    banner: String,
    framework_name: String,
    framework_avatar: String,
    repo_owner: Option<String>,
    repo_slug: Option<String>,
    repo_html_url: Option<String>,
    contributor: Option<Contributor>,
    demo_url: Option<String>,
}

fn cards(filtered: &[&CatalogTemplate]) -> Vec<CardView> {
    filtered
        .iter()
        .map(|template| CardView {
            name: template.name.clone(),
            description: template.description.clone(),
            href: format!("/templates/{}", template.slug),
            banner: template.banner.clone(),
            framework_name: template.framework.name.clone(),
            framework_avatar: template.framework.avatar.clone(),
            contributor: template
                .repository
                .as_ref()
                .and_then(|repo| repo.contributors.first().cloned()),
        })
        .collect()
}

fn facet_href(selection: &FilterSelection, facet: Facet, name: &str) -> String {
    let query = selection.toggled(facet, name).to_query();
    if query.is_empty() {
        "/templates".to_string()
    } else {
        format!("/templates?{query}")
    }
}

/// `GET /templates`
pub async fn gallery_page(
    State(state): State<SiteState>,
    HxRequest(is_htmx): HxRequest,
    Query(selection): Query<FilterSelection>,
) -> Result<Html<String>, SiteError> {
    let filtered = catalog::filter_templates(&state.templates, &selection);

    tracing::debug!(
        total = state.templates.len(),
        shown = filtered.len(),
        framework = ?selection.framework,
        category = ?selection.category,
        "Rendering gallery"
    );

    let cards = cards(&filtered);

    // Filter changes only swap the grid.
    if is_htmx {
        return render(&GalleryGridTemplate { cards });
    }

    let frameworks = catalog::count_frameworks(&state.templates)
        .into_iter()
        .map(|entry| FacetView {
            active: selection.framework.as_deref() == Some(entry.facet.name.as_str()),
            href: facet_href(&selection, Facet::Framework, &entry.facet.name),
            name: entry.facet.name,
            avatar: Some(entry.facet.avatar),
            amount: entry.amount,
        })
        .collect();

    let categories = catalog::count_categories(&state.templates)
        .into_iter()
        .map(|entry| FacetView {
            active: selection.category.as_deref() == Some(entry.facet.name.as_str()),
            href: facet_href(&selection, Facet::Category, &entry.facet.name),
            name: entry.facet.name,
            avatar: None,
            amount: entry.amount,
        })
        .collect();

    render(&GalleryTemplate {
        title: state.settings.title.clone(),
        sub_title: state.settings.sub_title.clone(),
        description: state.settings.description.clone(),
        cta_label: state.settings.cta_label.clone(),
        cta_target_url: state.settings.cta_target_url.clone(),
        frameworks,
        categories,
        search_value: selection.search.clone().unwrap_or_default(),
        framework_value: selection.framework.clone().unwrap_or_default(),
        category_value: selection.category.clone().unwrap_or_default(),
        cards,
    })
}

/// `GET /templates/{slug}`
pub async fn template_detail(
    State(state): State<SiteState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, SiteError> {
    let template = state
        .templates
        .iter()
        .find(|template| template.slug == slug)
        .ok_or_else(|| SiteError::NotFound(format!("template {slug}")))?
        .clone();

    // Contributor attribution comes from the catalog when present; an empty
    // list triggers a one-shot metadata fetch that degrades to no credit.
    let mut repository = template.repository;
    if let Some(repo) = repository.as_mut() {
        if repo.contributors.is_empty() {
            match state.repos.fetch_repo(&repo.identifier()).await {
                Ok(data) => repo.contributors = data.contributors.unwrap_or_default(),
                Err(error) => {
                    tracing::warn!(repo = %repo.identifier(), error = %error, "Repository metadata unavailable");
                }
            }
        }
    }

    render(&TemplateDetailTemplate {
        name: template.name,
        description: template.description,
        banner: template.banner,
        framework_name: template.framework.name,
        framework_avatar: template.framework.avatar,
        repo_owner: repository.as_ref().map(|repo| repo.owner.clone()),
        repo_slug: repository.as_ref().map(|repo| repo.slug.clone()),
        repo_html_url: repository.as_ref().map(|repo| repo.html_url.clone()),
        contributor: repository
            .as_ref()
            .and_then(|repo| repo.contributors.first().cloned()),
        demo_url: template.demo_url,
    })
}
