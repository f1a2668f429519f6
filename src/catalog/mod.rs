//! Facet filter engine for the template gallery
//!
//! Two independent facets (framework, category) plus a free-text search
//! over a flat catalog. Aggregation and filtering are pure functions of
//! the catalog and the current selection; facet counts are always computed
//! over the full unfiltered catalog.

use serde::Deserialize;

use crate::content::{Category, Framework, Template};

/// A facet value with its occurrence count
///
/// Retains the first-seen facet object so display data (avatar, label)
/// comes from a stable source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCount<T> {
    /// First-seen facet object for this name
    pub facet: T,

    /// Number of catalog entries carrying this facet value
    pub amount: usize,
}

/// Which facet a toggle applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    /// Framework facet
    Framework,
    /// Category facet
    Category,
}

/// Transient gallery selection state, carried in query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterSelection {
    /// Selected framework name, exact match
    #[serde(default)]
    pub framework: Option<String>,

    /// Selected category name, exact match
    #[serde(default)]
    pub category: Option<String>,

    /// Free-text search over name and description
    #[serde(default, rename = "q")]
    pub search: Option<String>,
}

impl FilterSelection {
    /// Apply radio-with-deselect toggle semantics to one facet.
    ///
    /// Selecting the currently active value clears that facet; selecting a
    /// different value replaces it. The other facet and the search text are
    /// untouched.
    pub fn toggle(&mut self, facet: Facet, name: &str) {
        let slot = match facet {
            Facet::Framework => &mut self.framework,
            Facet::Category => &mut self.category,
        };

        if slot.as_deref() == Some(name) {
            *slot = None;
        } else {
            *slot = Some(name.to_string());
        }
    }

    /// Copy of this selection with one facet toggled
    #[must_use]
    pub fn toggled(&self, facet: Facet, name: &str) -> Self {
        let mut next = self.clone();
        next.toggle(facet, name);
        next
    }

    /// Query string encoding of this selection, without a leading `?`
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();
        if let Some(framework) = &self.framework {
            parts.push(format!("framework={}", urlencoding::encode(framework)));
        }
        if let Some(category) = &self.category {
            parts.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(search) = &self.search {
            parts.push(format!("q={}", urlencoding::encode(search)));
        }
        parts.join("&")
    }
}

/// Count templates per framework over the full catalog
#[must_use]
pub fn count_frameworks(templates: &[Template]) -> Vec<FacetCount<Framework>> {
    let mut counts: Vec<FacetCount<Framework>> = Vec::new();
    for template in templates {
        match counts
            .iter_mut()
            .find(|entry| entry.facet.name == template.framework.name)
        {
            Some(entry) => entry.amount += 1,
            None => counts.push(FacetCount {
                facet: template.framework.clone(),
                amount: 1,
            }),
        }
    }
    counts
}

/// Count templates per category over the full catalog
#[must_use]
pub fn count_categories(templates: &[Template]) -> Vec<FacetCount<Category>> {
    let mut counts: Vec<FacetCount<Category>> = Vec::new();
    for template in templates {
        match counts
            .iter_mut()
            .find(|entry| entry.facet.name == template.category.name)
        {
            Some(entry) => entry.amount += 1,
            None => counts.push(FacetCount {
                facet: template.category.clone(),
                amount: 1,
            }),
        }
    }
    counts
}

/// Filter the catalog by the current selection.
///
/// Predicates are AND-combined; an absent filter passes everything. The
/// result preserves catalog order (a stable subsequence, never a reorder).
#[must_use]
pub fn filter_templates<'a>(
    templates: &'a [Template],
    selection: &FilterSelection,
) -> Vec<&'a Template> {
    templates
        .iter()
        .filter(|template| match &selection.framework {
            Some(name) => template.framework.name == *name,
            None => true,
        })
        .filter(|template| match &selection.category {
            Some(name) => template.category.name == *name,
            None => true,
        })
        .filter(|template| match &selection.search {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                template.name.to_lowercase().contains(&needle)
                    || template.description.to_lowercase().contains(&needle)
            }
            _ => true,
        })
        .collect()
}
