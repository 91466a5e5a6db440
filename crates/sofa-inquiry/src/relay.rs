//! # Inquiry Relay
//!
//! The outbound side of the inquiry form: one POST per submission, no
//! retry, no client-side timeout, no cancellation.
//!
//! ```text
//! InquiryForm ──► InquiryRelay::send(&payload)
//!                     │
//!                     ├── EmailJsRelay   (HTTPS, production)
//!                     └── test doubles   (count calls, fail on demand)
//! ```

use std::future::Future;

use tracing::{debug, warn};
use url::Url;

use crate::config::RelayConfig;
use crate::error::{InquiryError, InquiryResult};
use crate::payload::InquiryPayload;

/// Anything that can deliver an inquiry.
pub trait InquiryRelay: Send + Sync {
    /// Delivers the payload once.
    fn send(&self, payload: &InquiryPayload) -> impl Future<Output = InquiryResult<()>> + Send;
}

/// Relay backed by the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    client: reqwest::Client,
    endpoint: Url,
}

impl EmailJsRelay {
    /// Builds an HTTP client for the configured endpoint.
    pub fn new(config: &RelayConfig) -> InquiryResult<Self> {
        let endpoint = config.validate()?;
        let client = reqwest::Client::builder().build()?;

        Ok(EmailJsRelay { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl InquiryRelay for EmailJsRelay {
    async fn send(&self, payload: &InquiryPayload) -> InquiryResult<()> {
        debug!(
            endpoint = %self.endpoint,
            product_id = %payload.template_params.producto_id,
            "Posting inquiry to relay"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "Relay rejected inquiry");
        Err(InquiryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_uses_configured_endpoint() {
        let config = RelayConfig {
            endpoint: "http://127.0.0.1:9/send".into(),
            ..RelayConfig::default()
        };
        let relay = EmailJsRelay::new(&config).unwrap();
        assert_eq!(relay.endpoint().as_str(), "http://127.0.0.1:9/send");
    }

    #[test]
    fn test_relay_rejects_invalid_config() {
        let config = RelayConfig {
            endpoint: "not a url".into(),
            ..RelayConfig::default()
        };
        assert!(matches!(
            EmailJsRelay::new(&config),
            Err(InquiryError::InvalidConfig(_))
        ));
    }
}
