//! # Deep Links
//!
//! The storefront's addressable views and the query-string state of the
//! catalog.
//!
//! ## Paths
//! ```text
//! /                                   ──► Route::Home
//! /catalogo?categoria=sillas&query=.. ──► Route::Catalog(CatalogLink)
//! /producto/{id-or-slug}              ──► Route::Product(key)
//! anything else                       ──► RouteError::UnknownPath
//! ```
//!
//! ## State Sync
//! ```text
//!   link ──► CatalogLink::seed ──► (CategoryFilter, raw query)
//!                                          │  user edits
//!                                          ▼
//!   link ◄── CatalogLink::to_href ◄── CatalogLink::from_state
//! ```
//!
//! Links are accepted as absolute URLs or as bare paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::catalog::{Catalog, CategoryFilter};
use crate::error::RouteError;

/// Path of the catalog view.
pub const CATALOG_PATH: &str = "/catalogo";

/// Path prefix of product detail views.
pub const PRODUCT_PATH: &str = "/producto";

/// Base used to resolve bare paths.
const LINK_BASE: &str = "http://localhost";

const PARAM_CATEGORY: &str = "categoria";
const PARAM_QUERY: &str = "query";

// =============================================================================
// Catalog Link
// =============================================================================

/// Query-string state of the catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLink {
    /// `categoria` parameter, as written in the link.
    pub categoria: Option<String>,

    /// `query` parameter, verbatim.
    pub query: Option<String>,
}

impl CatalogLink {
    /// Renders a session's current state into a link.
    ///
    /// The sentinel category and an empty query are left out.
    pub fn from_state(category: &CategoryFilter, raw_query: &str) -> Self {
        CatalogLink {
            categoria: match category {
                CategoryFilter::All => None,
                CategoryFilter::Only(label) => Some(label.clone()),
            },
            query: (!raw_query.is_empty()).then(|| raw_query.to_string()),
        }
    }

    /// Reads `categoria` and `query` from a parsed URL.
    fn from_url(url: &Url) -> Self {
        let mut link = CatalogLink::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                PARAM_CATEGORY if !value.trim().is_empty() => {
                    link.categoria = Some(value.into_owned());
                }
                PARAM_QUERY if !value.is_empty() => link.query = Some(value.into_owned()),
                _ => {}
            }
        }
        link
    }

    /// Initial state of a catalog session opened from this link.
    ///
    /// The category is matched against the catalog's category list; unknown
    /// labels select the sentinel. The query seeds the raw query verbatim.
    ///
    /// ## Example
    /// ```rust
    /// use sofa_core::catalog::{Catalog, CategoryFilter};
    /// use sofa_core::dataset::load_products;
    /// use sofa_core::route::{CatalogLink, Route};
    ///
    /// let catalog = Catalog::new(load_products(
    ///     r#"[{"id": 1, "titulo": "Silla Eames", "categoria": "Sillas"}]"#,
    /// ).unwrap());
    ///
    /// let Route::Catalog(link) = Route::parse("/catalogo?categoria=sillas").unwrap() else {
    ///     panic!("not a catalog link");
    /// };
    /// let (category, query) = link.seed(&catalog);
    /// assert_eq!(category, CategoryFilter::Only("Sillas".into()));
    /// assert_eq!(query, "");
    /// ```
    pub fn seed(&self, catalog: &Catalog) -> (CategoryFilter, String) {
        let category = self
            .categoria
            .as_deref()
            .map(|label| catalog.resolve_category(label))
            .unwrap_or_default();
        (category, self.query.clone().unwrap_or_default())
    }

    /// Shareable path for this state.
    pub fn to_href(&self) -> String {
        if self.categoria.is_none() && self.query.is_none() {
            return CATALOG_PATH.to_string();
        }

        let mut params = form_urlencoded::Serializer::new(String::new());
        if let Some(categoria) = &self.categoria {
            params.append_pair(PARAM_CATEGORY, categoria);
        }
        if let Some(query) = &self.query {
            params.append_pair(PARAM_QUERY, query);
        }
        format!("{}?{}", CATALOG_PATH, params.finish())
    }
}

// =============================================================================
// Route
// =============================================================================

/// An addressable storefront view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "params", rename_all = "snake_case")]
pub enum Route {
    Home,
    Catalog(CatalogLink),
    /// Product detail, keyed by id or slug.
    Product(String),
}

impl Route {
    /// Parses an absolute URL or a path.
    ///
    /// ## Errors
    /// - [`RouteError::InvalidLink`] if the link is not a URL or path
    /// - [`RouteError::UnknownPath`] if no view lives at the path
    pub fn parse(link: &str) -> Result<Route, RouteError> {
        let link = link.trim();
        let invalid = |reason: String| RouteError::InvalidLink {
            link: link.to_string(),
            reason,
        };

        if link.is_empty() {
            return Err(invalid("empty link".to_string()));
        }

        let url = if link.contains("://") {
            Url::parse(link)
        } else {
            Url::parse(LINK_BASE).and_then(|base| base.join(link))
        }
        .map_err(|e| invalid(e.to_string()))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["catalogo"] => Ok(Route::Catalog(CatalogLink::from_url(&url))),
            ["producto", key] => {
                let key = urlencoding::decode(key).map_err(|e| invalid(e.to_string()))?;
                Ok(Route::Product(key.into_owned()))
            }
            _ => Err(RouteError::UnknownPath(url.path().to_string())),
        }
    }

    /// Path (and query string) of this view.
    pub fn to_href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Catalog(link) => link.to_href(),
            Route::Product(key) => format!("{}/{}", PRODUCT_PATH, urlencoding::encode(key)),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_href())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::product;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("1", "Silla Roble", "Sillas"),
            product("2", "Sofá Nórdico", "Sofás"),
        ])
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("https://tienda.com.ar").unwrap(), Route::Home);
        assert_eq!(
            Route::parse("/catalogo").unwrap(),
            Route::Catalog(CatalogLink::default())
        );
        assert_eq!(
            Route::parse("/producto/12").unwrap(),
            Route::Product("12".to_string())
        );
        assert_eq!(
            Route::parse("/producto/sofa-cama/").unwrap(),
            Route::Product("sofa-cama".to_string())
        );
    }

    #[test]
    fn test_parse_absolute_catalog_link() {
        let route =
            Route::parse("https://tienda.com.ar/catalogo?categoria=sillas&query=roble+claro").unwrap();
        assert_eq!(
            route,
            Route::Catalog(CatalogLink {
                categoria: Some("sillas".to_string()),
                query: Some("roble claro".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed_links() {
        assert!(matches!(
            Route::parse("/carrito"),
            Err(RouteError::UnknownPath(path)) if path == "/carrito"
        ));
        assert!(matches!(
            Route::parse("/producto"),
            Err(RouteError::UnknownPath(_))
        ));
        assert!(matches!(Route::parse("   "), Err(RouteError::InvalidLink { .. })));
        assert!(matches!(
            Route::parse("http://[broken"),
            Err(RouteError::InvalidLink { .. })
        ));
    }

    #[test]
    fn test_category_param_preselects_category() {
        let Route::Catalog(link) = Route::parse("/catalogo?categoria=sillas").unwrap() else {
            panic!("expected catalog route");
        };
        let (category, query) = link.seed(&catalog());
        assert_eq!(category, CategoryFilter::Only("Sillas".to_string()));
        assert_eq!(query, "");
    }

    #[test]
    fn test_seed_unknown_category_and_verbatim_query() {
        let link = CatalogLink {
            categoria: Some("Lámparas".to_string()),
            query: Some("  SOFÁ ".to_string()),
        };
        let (category, query) = link.seed(&catalog());
        assert_eq!(category, CategoryFilter::All);
        assert_eq!(query, "  SOFÁ ");
    }

    #[test]
    fn test_state_round_trips_through_href() {
        let link = CatalogLink::from_state(&CategoryFilter::Only("Sofás".into()), "mesa ratoña & co");
        let href = link.to_href();
        assert!(href.starts_with("/catalogo?categoria="));
        assert_eq!(Route::parse(&href).unwrap(), Route::Catalog(link));

        let empty = CatalogLink::from_state(&CategoryFilter::All, "");
        assert_eq!(empty.to_href(), "/catalogo");
    }

    #[test]
    fn test_product_route_round_trip() {
        let route = Route::Product("sillón bergère".to_string());
        assert_eq!(Route::parse(&route.to_href()).unwrap(), route);
        assert_eq!(Route::Product("12".into()).to_string(), "/producto/12");
        assert_eq!("/".parse::<Route>().unwrap(), Route::Home);
    }
}
