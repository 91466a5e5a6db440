//! # Product Commands
//!
//! Product detail view, resolved from a deep link key.
//!
//! ## Detail Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  /producto/{key}                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::find(key) ── id or slug ──► Product                           │
//! │       │                                   │                             │
//! │       └── no match ──► NOT_FOUND          ├── gallery (placeholder)     │
//! │                                           ├── copy + specifications     │
//! │                                           ├── swatches                  │
//! │                                           ├── Alto/Ancho/Profundidad    │
//! │                                           └── related (same category)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sofa_core::color::swatch_hex;
use sofa_core::{Specification, RELATED_PRODUCTS_LIMIT};
use tracing::debug;

use super::ProductCard;
use crate::error::ApiError;
use crate::state::AppState;

/// A finish with its resolved swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwatchDto {
    pub name: String,
    pub hex: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    #[serde(flatten)]
    pub product: ProductCard,
    pub slug: Option<String>,
    /// Label line under the title ("Mesas • Living").
    pub labels: String,
    /// Long description, else description, else short description.
    pub description: Option<String>,
    pub specifications: Vec<Specification>,
    /// Never empty; the placeholder stands in for a missing gallery.
    pub gallery: Vec<String>,
    pub colors: Vec<SwatchDto>,
    /// One measurement per line.
    pub measurements: String,
    pub related: Vec<ProductCard>,
}

/// Gets a product by id or slug.
///
/// ## Returns
/// The detail view, or `NOT_FOUND`. Unknown keys never fall back to
/// another product.
pub fn product_detail(state: &AppState, key: &str) -> Result<ProductDetailView, ApiError> {
    debug!(key = %key, "product_detail command");

    let catalog = state.catalog();
    let product = catalog.find(key)?;

    let related = catalog
        .related(product, RELATED_PRODUCTS_LIMIT)
        .into_iter()
        .map(ProductCard::from)
        .collect();

    Ok(ProductDetailView {
        product: ProductCard::from(product),
        slug: product.slug.clone(),
        labels: product.category_line(),
        description: product.detail_description().map(String::from),
        specifications: product.specifications.clone(),
        gallery: product.gallery().into_iter().map(String::from).collect(),
        colors: product
            .colors
            .iter()
            .map(|c| SwatchDto {
                name: c.name.clone(),
                hex: swatch_hex(c),
            })
            .collect(),
        measurements: product.dimensions.detail_lines(),
        related,
    })
}
