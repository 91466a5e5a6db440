//! # Commands Module
//!
//! One function per storefront view. Each returns a serializable DTO or an
//! [`ApiError`]; `main.rs` prints either as JSON.
//!
//! ## Command Reference
//!
//! | Module    | Commands                         | Description                    |
//! |-----------|----------------------------------|--------------------------------|
//! | `home`    | `home`                           | Store name, categories, cards  |
//! | `catalog` | `categories`, `catalog_view`, `browse` | Filtered, debounced catalog |
//! | `product` | `product_detail`                 | Detail view by id or slug      |
//! | `inquiry` | `inquire`                        | Contact/quote form submission  |
//! | (here)    | `open_link`                      | Resolve any deep link          |

pub mod catalog;
pub mod home;
pub mod inquiry;
pub mod product;

use serde::Serialize;
use sofa_core::{Product, Route};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

use self::catalog::CatalogView;
use self::home::HomeView;
use self::product::ProductDetailView;

/// Product card DTO, shared by the home, catalog and detail views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    /// Path of the detail view.
    pub href: String,
    /// Price formatted for es-AR, e.g. `$ 85.000`.
    pub price: String,
    pub price_cents: i64,
    pub category: String,
    pub image: String,
    pub color: String,
    pub swatch: String,
    pub dimensions: Option<String>,
    pub short_description: Option<String>,
}

impl From<&Product> for ProductCard {
    fn from(p: &Product) -> Self {
        ProductCard {
            id: p.id.clone(),
            title: p.title.clone(),
            href: Route::Product(p.id.clone()).to_href(),
            price: p.price().format_ars(),
            price_cents: p.price().cents(),
            category: p.category.clone(),
            image: p.primary_image().to_string(),
            color: p.primary_color_name().to_string(),
            swatch: p.primary_swatch(),
            dimensions: p.dimensions.card_label(),
            short_description: p.short_description.clone(),
        }
    }
}

/// Any view a deep link can open.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Home(HomeView),
    Catalog(CatalogView),
    Product(ProductDetailView),
}

/// Resolves a deep link (URL or path) and renders its view.
///
/// ## Errors
/// - `VALIDATION_ERROR` for malformed links
/// - `NOT_FOUND` for unknown paths and unknown product keys
pub fn open_link(state: &AppState, link: &str) -> Result<View, ApiError> {
    let route = Route::parse(link)?;
    debug!(link = %link, route = %route, "open_link command");

    match route {
        Route::Home => Ok(View::Home(home::home(state))),
        Route::Catalog(link) => Ok(View::Catalog(CatalogView::from_link(state.catalog(), &link))),
        Route::Product(key) => Ok(View::Product(product::product_detail(state, &key)?)),
    }
}
