//! # Catalog Query Engine
//!
//! Turns the product dataset, a free-text query and a selected category
//! into the visible result list.
//!
//! ## Query Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Query Flow                               │
//! │                                                                         │
//! │  dataset (immutable) ──► extract_categories ──► ["Todas", "Sofás", ..]  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  filter_products(dataset, raw query, CategoryFilter)                    │
//! │        │                                                                │
//! │        ├── category match: All, or normalize(selected) ==               │
//! │        │                   normalize(product.category)                  │
//! │        │                                                                │
//! │        ├── text match: empty query, or normalize(query) is a            │
//! │        │               substring of a normalized searchable field       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Vec<&Product> in dataset order (never reordered)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs. Derived views are
//! recomputed on demand; the dataset itself is never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::normalize::{normalize, same_label};
use crate::types::Product;
use crate::ALL_CATEGORIES;

// =============================================================================
// Category Filter
// =============================================================================

/// The selected category of a catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// The "Todas" sentinel: no category filtering.
    #[default]
    All,

    /// Only products whose category equals this label once normalized.
    Only(String),
}

impl CategoryFilter {
    /// Builds a filter from a UI label. The sentinel and blank labels
    /// disable filtering.
    pub fn from_label(label: &str) -> Self {
        if label.trim().is_empty() || same_label(label, ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    /// Label shown in the category list.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(label) => label,
        }
    }

    /// Returns true for the sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Category half of the filter contract.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => same_label(label, &product.category),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Category Extractor
// =============================================================================

/// Derives the category list: the sentinel first, then each distinct
/// primary category in first-seen order.
///
/// ## Example
/// ```text
/// categories ["Sofás", "Sillas", "Sofás"]  ──►  ["Todas", "Sofás", "Sillas"]
/// ```
pub fn extract_categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !categories.iter().any(|c| c == &product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

// =============================================================================
// Catalog Filter
// =============================================================================

/// Filters the dataset by raw query and category, preserving order.
///
/// An empty raw query matches every product. A query that normalizes to
/// nothing (only punctuation) matches every product as well.
pub fn filter_products<'a>(
    products: &'a [Product],
    raw_query: &str,
    category: &CategoryFilter,
) -> Vec<&'a Product> {
    let needle = normalize(raw_query);

    products
        .iter()
        .filter(|product| category.matches(product))
        .filter(|product| raw_query.is_empty() || matches_text(product, &needle))
        .collect()
}

/// Text half of the filter contract.
fn matches_text(product: &Product, needle: &str) -> bool {
    product
        .searchable_fields()
        .iter()
        .any(|field| normalize(field).contains(needle))
}

// =============================================================================
// Catalog Results
// =============================================================================

/// Outcome of a catalog search.
///
/// An empty result is a normal outcome; the view shows
/// [`CatalogResults::no_results_message`] with a "clear search" action.
#[derive(Debug, Clone)]
pub struct CatalogResults<'a> {
    items: Vec<&'a Product>,
    query: String,
    category: CategoryFilter,
}

impl<'a> CatalogResults<'a> {
    /// Matching products in dataset order.
    pub fn items(&self) -> &[&'a Product] {
        &self.items
    }

    pub fn into_items(self) -> Vec<&'a Product> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The raw query the results were computed for.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Message for the empty state, `None` when there are results.
    pub fn no_results_message(&self) -> Option<String> {
        if !self.is_empty() {
            return None;
        }
        if self.query.trim().is_empty() {
            Some(format!("No hay productos en la categoría “{}”", self.category))
        } else {
            Some(format!("No se encontraron resultados para “{}”", self.query.trim()))
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The read-only product dataset plus its derived category list.
///
/// Views receive a `Catalog` explicitly (usually behind an `Arc`) instead of
/// importing the dataset.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<String>,
}

impl Catalog {
    /// Wraps an adapted dataset.
    pub fn new(products: Vec<Product>) -> Self {
        let categories = extract_categories(&products);
        Catalog {
            products,
            categories,
        }
    }

    /// All products, in dataset order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Category list, sentinel first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Runs the catalog filter.
    pub fn search(&self, raw_query: &str, category: &CategoryFilter) -> CatalogResults<'_> {
        CatalogResults {
            items: filter_products(&self.products, raw_query, category),
            query: raw_query.to_string(),
            category: category.clone(),
        }
    }

    /// Matches a label (from a link or a click) against the category list,
    /// case and accent-insensitively. Unknown labels select the sentinel.
    ///
    /// ## Example
    /// ```rust
    /// use sofa_core::catalog::{Catalog, CategoryFilter};
    /// use sofa_core::dataset::load_products;
    ///
    /// let catalog = Catalog::new(load_products(
    ///     r#"[{"id": 1, "titulo": "Silla Eames", "precio": 1, "categoria": "Sillas"}]"#,
    /// ).unwrap());
    ///
    /// assert_eq!(catalog.resolve_category("sillas"), CategoryFilter::Only("Sillas".into()));
    /// assert_eq!(catalog.resolve_category("lamparas"), CategoryFilter::All);
    /// ```
    pub fn resolve_category(&self, label: &str) -> CategoryFilter {
        let wanted = normalize(label);
        if wanted.is_empty() {
            return CategoryFilter::All;
        }
        self.categories
            .iter()
            .find(|c| normalize(c) == wanted)
            .map(|c| CategoryFilter::from_label(c))
            .unwrap_or_default()
    }

    /// Resolves a deep-link key (id or slug).
    ///
    /// Unknown keys are an explicit not-found, never a silent fallback to
    /// another product.
    pub fn find(&self, key: &str) -> CoreResult<&Product> {
        let key = key.trim();
        self.products
            .iter()
            .find(|p| p.matches_key(key))
            .ok_or_else(|| CoreError::ProductNotFound(key.to_string()))
    }

    /// Other products sharing the product's primary category.
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.id != product.id && p.has_category(&product.category))
            .take(limit)
            .collect()
    }

    /// The first `limit` products, for the home view.
    pub fn featured(&self, limit: usize) -> &[Product] {
        &self.products[..limit.min(self.products.len())]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
