//! # sofa-core: Pure Catalog Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the catalog
//! query engine and every rule the views depend on, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (apps/storefront)                 │   │
//! │  │    Home ──► Catalog (debounced search) ──► Product ──► Inquiry  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sofa-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │  │  catalog  │  │  dataset  │  │   route   │  │   │
//! │  │   │  accents  │  │ categories│  │  adapter  │  │ deep links│  │   │
//! │  │   │  case     │  │  filter   │  │  variants │  │ ?categoria│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              sofa-inquiry (EmailJS relay client)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Canonical domain types (Product, Color, Dimensions, InquiryFields)
//! - [`money`] - Money type with integer cents and es-AR formatting
//! - [`normalize`] - Accent/case-insensitive text normalization
//! - [`catalog`] - Category extraction and catalog filtering
//! - [`dataset`] - Adapter from every dataset variant to the canonical shape
//! - [`route`] - Deep links (`/catalogo?categoria=..`, `/producto/{id}`)
//! - [`color`] - Swatch colors for named finishes
//! - [`validation`] - Inquiry form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sofa_core::catalog::{Catalog, CategoryFilter};
//! use sofa_core::dataset::load_products;
//!
//! let products = load_products(r#"[
//!     {"id": 1, "titulo": "Silla Roble Natural", "precio": 85000, "categoria": "Sillas"},
//!     {"id": 2, "titulo": "Sofá Nórdico", "precio": 640000, "categoria": "Sofás"}
//! ]"#).unwrap();
//!
//! let catalog = Catalog::new(products);
//! assert_eq!(catalog.categories(), ["Todas", "Sillas", "Sofás"]);
//!
//! let results = catalog.search("nordico", &CategoryFilter::All);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results.items()[0].title, "Sofá Nórdico");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod color;
pub mod dataset;
pub mod error;
pub mod money;
pub mod normalize;
pub mod route;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogResults, CategoryFilter};
pub use error::{CoreError, CoreResult, DatasetError, RouteError, ValidationError};
pub use money::Money;
pub use normalize::{normalize, normalize_opt};
pub use route::{CatalogLink, Route};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel label that disables category filtering.
pub const ALL_CATEGORIES: &str = "Todas";

/// Label given to products whose record carries no category.
pub const FALLBACK_CATEGORY: &str = "Otros";

/// Image shown when a product has no gallery.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.webp";

/// Maximum number of related products on a detail view.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Quiet interval before a raw query becomes the effective query.
pub const DEFAULT_DEBOUNCE_MS: u64 = 350;
