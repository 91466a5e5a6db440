//! # Relay Configuration
//!
//! Identifiers of the EmailJS account the storefront sends inquiries
//! through. The storefront loads them from its `[relay]` config section.
//!
//! ## Configuration File Format
//! ```toml
//! [relay]
//! endpoint = "https://api.emailjs.com/api/v1.0/email/send"
//! service_id = "service_sn2mqqn"
//! template_id = "template_mr1fg2e"
//! public_key = "o_dMBJLFui2faWyBA"
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{InquiryError, InquiryResult};

/// EmailJS REST endpoint.
pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Relay account settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// URL the inquiry is POSTed to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_service_id")]
    pub service_id: String,

    #[serde(default = "default_template_id")]
    pub template_id: String,

    /// Public key of the account, sent as `user_id`.
    #[serde(default = "default_public_key")]
    pub public_key: String,
}

fn default_endpoint() -> String {
    EMAILJS_ENDPOINT.to_string()
}

fn default_service_id() -> String {
    "service_sn2mqqn".to_string()
}

fn default_template_id() -> String {
    "template_mr1fg2e".to_string()
}

fn default_public_key() -> String {
    "o_dMBJLFui2faWyBA".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            endpoint: default_endpoint(),
            service_id: default_service_id(),
            template_id: default_template_id(),
            public_key: default_public_key(),
        }
    }
}

impl RelayConfig {
    /// Validates the settings and returns the parsed endpoint.
    pub fn validate(&self) -> InquiryResult<Url> {
        for (name, value) in [
            ("service_id", &self.service_id),
            ("template_id", &self.template_id),
            ("public_key", &self.public_key),
        ] {
            if value.trim().is_empty() {
                return Err(InquiryError::InvalidConfig(format!("{} is empty", name)));
            }
        }

        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| InquiryError::InvalidConfig(format!("endpoint: {}", e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(InquiryError::InvalidConfig(format!(
                "endpoint must start with http:// or https://, got: {}",
                self.endpoint
            )));
        }

        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RelayConfig::default();
        assert_eq!(config.validate().unwrap().as_str(), EMAILJS_ENDPOINT);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = RelayConfig::default();
        config.public_key = "  ".into();
        assert!(matches!(config.validate(), Err(InquiryError::InvalidConfig(_))));

        let mut config = RelayConfig::default();
        config.endpoint = "ftp://relay.example.com".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let config: RelayConfig = serde_json::from_str(r#"{"service_id": "service_x"}"#).unwrap();
        assert_eq!(config.service_id, "service_x");
        assert_eq!(config.template_id, "template_mr1fg2e");
    }

    #[test]
    fn test_legacy_timeout_setting_is_ignored() {
        let config: RelayConfig =
            serde_json::from_str(r#"{"service_id": "service_x", "timeout_secs": 15}"#).unwrap();
        assert_eq!(
            config,
            RelayConfig {
                service_id: "service_x".into(),
                ..RelayConfig::default()
            }
        );
    }
}
