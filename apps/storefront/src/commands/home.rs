//! # Home Command
//!
//! Landing view: store name, the category dropdown and a featured
//! selection of the dataset.

use serde::Serialize;
use sofa_core::{CatalogLink, CategoryFilter};

use super::ProductCard;
use crate::state::AppState;

/// Entry of the navigation dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub store_name: String,
    pub categories: Vec<CategoryLink>,
    pub featured: Vec<ProductCard>,
    pub catalog_href: String,
}

/// Links for every category, sentinel first.
pub fn category_links(state: &AppState) -> Vec<CategoryLink> {
    state
        .catalog()
        .categories()
        .iter()
        .map(|label| CategoryLink {
            label: label.clone(),
            href: CatalogLink::from_state(&CategoryFilter::from_label(label), "").to_href(),
        })
        .collect()
}

/// Renders the home view.
pub fn home(state: &AppState) -> HomeView {
    let featured = state
        .catalog()
        .featured(state.config().catalog.featured)
        .iter()
        .map(ProductCard::from)
        .collect();

    HomeView {
        store_name: state.config().site.name.clone(),
        categories: category_links(state),
        featured,
        catalog_href: CatalogLink::default().to_href(),
    }
}
