//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SOFA_DATASET=/srv/catalogo.json                                    │
//! │     SOFA_SITE_ORIGIN=https://tienda.com.ar                             │
//! │     SOFA_DEBOUNCE_MS=350                                               │
//! │     SOFA_RELAY_ENDPOINT / _SERVICE_ID / _TEMPLATE_ID / _PUBLIC_KEY     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/forniture-sofa/storefront.toml (Linux)                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     bundled dataset, 350 ms debounce, public relay account             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [site]
//! name = "Forniture & Sofa"
//! origin = "https://tienda.com.ar"
//!
//! [catalog]
//! dataset = "/srv/catalogo.json"   # omit to use the bundled dataset
//! debounce_ms = 350
//! featured = 6
//!
//! [relay]
//! service_id = "service_sn2mqqn"
//! template_id = "template_mr1fg2e"
//! public_key = "o_dMBJLFui2faWyBA"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sofa_core::DEFAULT_DEBOUNCE_MS;
use sofa_inquiry::RelayConfig;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// `[site]`: identity of the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Store name shown on the home view.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Public origin, used to make image URLs absolute in inquiry emails.
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_site_name() -> String {
    "Forniture & Sofa".to_string()
}

fn default_origin() -> String {
    "http://localhost:5173".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            name: default_site_name(),
            origin: default_origin(),
        }
    }
}

/// `[catalog]`: dataset and browsing behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Dataset file. `None` uses the dataset bundled into the binary.
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Quiet interval of the search box (milliseconds).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Number of products featured on the home view.
    #[serde(default = "default_featured")]
    pub featured: usize,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_featured() -> usize {
    6
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            dataset: None,
            debounce_ms: default_debounce_ms(),
            featured: default_featured(),
        }
    }
}

impl CatalogSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub relay: RelayConfig,
}

impl StorefrontConfig {
    /// Loads configuration from file (if present) and environment.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading storefront config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "catalog.debounce_ms must be greater than 0".into(),
            ));
        }

        if !self.site.origin.starts_with("http://") && !self.site.origin.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "site.origin must start with http:// or https://, got: {}",
                self.site.origin
            )));
        }

        self.relay
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("SOFA_DATASET") {
            debug!(dataset = %path, "Overriding dataset from environment");
            self.catalog.dataset = Some(PathBuf::from(path));
        }

        if let Some(origin) = lookup("SOFA_SITE_ORIGIN") {
            self.site.origin = origin;
        }

        if let Some(ms) = lookup("SOFA_DEBOUNCE_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.catalog.debounce_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric SOFA_DEBOUNCE_MS"),
            }
        }

        if let Some(endpoint) = lookup("SOFA_RELAY_ENDPOINT") {
            self.relay.endpoint = endpoint;
        }

        if let Some(id) = lookup("SOFA_RELAY_SERVICE_ID") {
            self.relay.service_id = id;
        }

        if let Some(id) = lookup("SOFA_RELAY_TEMPLATE_ID") {
            self.relay.template_id = id;
        }

        if let Some(key) = lookup("SOFA_RELAY_PUBLIC_KEY") {
            self.relay.public_key = key;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ar", "forniture-sofa", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.site.name, "Forniture & Sofa");
        assert_eq!(config.catalog.debounce_ms, 350);
        assert_eq!(config.catalog.dataset, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_then_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[site]
origin = "https://tienda.com.ar"

[catalog]
debounce_ms = 500
featured = 3

[relay]
service_id = "service_file"
"#
        )
        .unwrap();

        let mut config = StorefrontConfig::from_file(file.path()).unwrap();
        assert_eq!(config.site.origin, "https://tienda.com.ar");
        assert_eq!(config.site.name, "Forniture & Sofa");
        assert_eq!(config.catalog.debounce_ms, 500);
        assert_eq!(config.relay.service_id, "service_file");
        assert_eq!(config.relay.template_id, "template_mr1fg2e");

        config.apply_overrides(lookup(&[
            ("SOFA_DEBOUNCE_MS", "200"),
            ("SOFA_RELAY_SERVICE_ID", "service_env"),
            ("SOFA_DATASET", "/srv/catalogo.json"),
        ]));
        assert_eq!(config.catalog.debounce_ms, 200);
        assert_eq!(config.catalog.debounce(), Duration::from_millis(200));
        assert_eq!(config.relay.service_id, "service_env");
        assert_eq!(config.catalog.dataset, Some(PathBuf::from("/srv/catalogo.json")));
        assert_eq!(config.catalog.featured, 3);
    }

    #[test]
    fn test_bad_override_is_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(lookup(&[("SOFA_DEBOUNCE_MS", "fast")]));
        assert_eq!(config.catalog.debounce_ms, 350);
    }

    #[test]
    fn test_validation() {
        let mut config = StorefrontConfig::default();
        config.site.origin = "tienda.com.ar".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = StorefrontConfig::default();
        config.catalog.debounce_ms = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.relay.service_id = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig::load(Some(dir.path().join("nope.toml")));
        assert!(config.is_ok());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[catalog]\ndebounce_ms = \"slow\"").unwrap();
        assert!(matches!(
            StorefrontConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
