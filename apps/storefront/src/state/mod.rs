//! # State Module
//!
//! Application state shared by the storefront commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐   │
//! │  │        AppState          │        │       CatalogSession         │   │
//! │  │                          │  Arc   │       (one per visitor)      │   │
//! │  │  catalog: Arc<Catalog> ──┼───────►│  category, raw/effective     │   │
//! │  │  config: StorefrontConfig│        │  query, visible products,    │   │
//! │  │                          │        │  Debouncer task              │   │
//! │  └──────────────────────────┘        └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Catalog: read-only after load, shared through Arc                    │
//! │  • CatalogSession: owned by the command driving it, no locks            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod debounce;

pub use catalog::CatalogSession;
pub use debounce::Debouncer;

use std::sync::Arc;

use sofa_core::dataset::load_products;
use sofa_core::{Catalog, CatalogLink};
use sofa_inquiry::parse_origin;
use tracing::info;
use url::Url;

use crate::config::StorefrontConfig;
use crate::error::{ApiError, ErrorCode};

/// Dataset compiled into the binary.
pub const BUNDLED_DATASET: &str = include_str!("../../data/catalogo.json");

/// State shared by every command.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    config: Arc<StorefrontConfig>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: StorefrontConfig) -> Self {
        AppState {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    /// Loads the configured dataset (or the bundled one).
    pub fn load(config: StorefrontConfig) -> Result<Self, ApiError> {
        let products = match &config.catalog.dataset {
            Some(path) => {
                info!(?path, "Loading dataset from file");
                let json = std::fs::read_to_string(path).map_err(|e| {
                    ApiError::new(
                        ErrorCode::DatasetError,
                        format!("Failed to read dataset {}: {}", path.display(), e),
                    )
                })?;
                load_products(&json)?
            }
            None => load_products(BUNDLED_DATASET)?,
        };

        let catalog = Catalog::new(products);
        info!(
            products = catalog.len(),
            categories = catalog.categories().len() - 1,
            "Catalog loaded"
        );

        Ok(AppState::new(catalog, config))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Opens a catalog session with the configured debounce interval.
    pub fn open_session(&self, link: &CatalogLink) -> CatalogSession {
        CatalogSession::open(Arc::clone(&self.catalog), link, self.config.catalog.debounce())
    }

    /// Site origin as a URL.
    pub fn origin(&self) -> Result<Url, ApiError> {
        Ok(parse_origin(&self.config.site.origin)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_dataset_loads() {
        let state = AppState::load(StorefrontConfig::default()).unwrap();
        assert_eq!(state.catalog().len(), 10);
        assert_eq!(
            state.catalog().categories(),
            ["Todas", "Sofás", "Sillas", "Mesas", "Organización", "Otros"]
        );
        assert!(state.catalog().find("sofa-escandinavo").is_ok());
        assert!(state.catalog().find("mesa-ratona-nogal").is_ok());
    }

    #[test]
    fn test_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "titulo": "Puff", "categoria": "Living"}}]"#).unwrap();

        let mut config = StorefrontConfig::default();
        config.catalog.dataset = Some(file.path().to_path_buf());

        let state = AppState::load(config).unwrap();
        assert_eq!(state.catalog().categories(), ["Todas", "Living"]);
    }

    #[test]
    fn test_missing_or_broken_dataset() {
        let mut config = StorefrontConfig::default();
        config.catalog.dataset = Some("/nonexistent/catalogo.json".into());
        let err = AppState::load(config).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatasetError);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1}}, {{"id": 1}}]"#).unwrap();
        let mut config = StorefrontConfig::default();
        config.catalog.dataset = Some(file.path().to_path_buf());
        let err = AppState::load(config).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatasetError);
    }
}
