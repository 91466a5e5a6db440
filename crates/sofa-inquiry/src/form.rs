//! # Inquiry Form
//!
//! State of the contact/quote form on a product page.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Editing ──submit──► validate ──✗──► Editing + inline message          │
//! │                          │            (relay NOT called)                │
//! │                          ✓                                              │
//! │                          ▼                                              │
//! │                       Sending ──relay.send (once)──┬──► Sent            │
//! │                                                   │    fields cleared   │
//! │                                                   │                     │
//! │                                                   └──► Failed           │
//! │                                                        "No se pudo      │
//! │                                                         enviar la       │
//! │                                                         consulta."      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Submitting again from `Sent` or `Failed` starts over from validation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sofa_core::validation::{inline_message, validate_inquiry};
use sofa_core::{InquiryFields, Product};
use tracing::{error, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::error::InquiryResult;
use crate::payload::{InquiryPayload, TemplateParams};
use crate::relay::InquiryRelay;

/// Message shown when the relay call fails, whatever the cause.
pub const FAILURE_MESSAGE: &str = "No se pudo enviar la consulta.";

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Editing,
    Sending,
    Sent,
    Failed,
}

/// Proof of a delivered inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryReceipt {
    pub id: Uuid,
    pub product_id: String,
    pub sent_at: DateTime<Utc>,
}

/// The inquiry form of one product page.
#[derive(Debug)]
pub struct InquiryForm<R> {
    relay: R,
    config: RelayConfig,
    origin: Url,
    fields: InquiryFields,
    status: FormStatus,
    message: Option<String>,
}

impl<R: InquiryRelay> InquiryForm<R> {
    pub fn new(relay: R, config: RelayConfig, origin: Url) -> Self {
        InquiryForm {
            relay,
            config,
            origin,
            fields: InquiryFields::default(),
            status: FormStatus::default(),
            message: None,
        }
    }

    pub fn fields(&self) -> &InquiryFields {
        &self.fields
    }

    /// Mutable access for typing into the form.
    pub fn fields_mut(&mut self) -> &mut InquiryFields {
        &mut self.fields
    }

    pub fn set_fields(&mut self, fields: InquiryFields) {
        self.fields = fields;
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Inline validation message or the failure message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Validates the form and, if valid, sends it once.
    ///
    /// ## Errors
    /// - [`crate::InquiryError::Validation`]: nothing was sent, the form
    ///   keeps its values and shows the inline message
    /// - any relay error: the form shows [`FAILURE_MESSAGE`]
    pub async fn submit(&mut self, product: &Product) -> InquiryResult<InquiryReceipt> {
        self.message = None;

        if let Err(err) = validate_inquiry(&self.fields) {
            warn!(field = err.field(), "Inquiry rejected by validation");
            self.status = FormStatus::Editing;
            self.message = Some(inline_message(&err).to_string());
            return Err(err.into());
        }

        self.status = FormStatus::Sending;

        let outcome = match TemplateParams::new(&self.fields, product, &self.origin) {
            Ok(params) => {
                let payload = InquiryPayload::new(&self.config, params);
                self.relay.send(&payload).await
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => {
                let receipt = InquiryReceipt {
                    id: Uuid::new_v4(),
                    product_id: product.id.clone(),
                    sent_at: Utc::now(),
                };
                info!(receipt_id = %receipt.id, product_id = %product.id, "Inquiry sent");
                self.status = FormStatus::Sent;
                self.fields.clear();
                Ok(receipt)
            }
            Err(err) => {
                error!(product_id = %product.id, error = %err, "Inquiry submission failed");
                self.status = FormStatus::Failed;
                self.message = Some(FAILURE_MESSAGE.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use sofa_core::{Color, Dimensions, Money};

    use crate::error::InquiryError;
    use crate::payload::parse_origin;

    /// Relay double that records payloads and fails on demand.
    #[derive(Default)]
    struct FakeRelay {
        calls: AtomicUsize,
        fail_with: Option<u16>,
        last: Mutex<Option<InquiryPayload>>,
    }

    impl FakeRelay {
        fn failing(status: u16) -> Self {
            FakeRelay {
                fail_with: Some(status),
                ..FakeRelay::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl InquiryRelay for FakeRelay {
        async fn send(&self, payload: &InquiryPayload) -> InquiryResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(payload.clone());
            match self.fail_with {
                Some(status) => Err(InquiryError::Rejected {
                    status,
                    body: "rejected".into(),
                }),
                None => Ok(()),
            }
        }
    }

    fn product() -> Product {
        Product {
            id: "7".into(),
            slug: None,
            title: "Silla Roble Natural".into(),
            price: Money::from_cents(8_500_000),
            category: "Sillas".into(),
            categories: vec!["Sillas".into()],
            dimensions: Dimensions::from_text("80 x 45 x 50 cm"),
            colors: vec![Color::named("Roble")],
            images: vec!["/muebles/silla-roble.jpg".into()],
            short_description: None,
            description: None,
            long_description: None,
            specifications: Vec::new(),
        }
    }

    fn form(relay: FakeRelay) -> InquiryForm<FakeRelay> {
        let origin = parse_origin("https://tienda.com.ar").unwrap();
        InquiryForm::new(relay, RelayConfig::default(), origin)
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_relay() {
        let mut form = form(FakeRelay::default());
        form.set_fields(InquiryFields {
            nombre: "Ana".into(),
            email: "not-an-email".into(),
            ..InquiryFields::default()
        });

        let err = form.submit(&product()).await.unwrap_err();

        assert!(matches!(err, InquiryError::Validation(_)));
        assert_eq!(form.relay().calls(), 0);
        assert_eq!(form.status(), FormStatus::Editing);
        assert_eq!(form.message(), Some("Ingrese un email válido"));
        assert_eq!(form.fields().email, "not-an-email");
    }

    #[tokio::test]
    async fn test_missing_name_never_reaches_relay() {
        let mut form = form(FakeRelay::default());
        form.fields_mut().email = "ana@example.com".into();

        assert!(form.submit(&product()).await.is_err());
        assert_eq!(form.relay().calls(), 0);
        assert_eq!(form.message(), Some("Ingrese su nombre"));
    }

    #[tokio::test]
    async fn test_valid_form_sends_exactly_once_and_clears() {
        let mut form = form(FakeRelay::default());
        form.set_fields(InquiryFields {
            nombre: "Ana".into(),
            email: "ana@example.com".into(),
            nota: "¿Hacen envíos?".into(),
            ..InquiryFields::default()
        });

        let receipt = form.submit(&product()).await.unwrap();

        assert_eq!(receipt.product_id, "7");
        assert_eq!(form.relay().calls(), 1);
        assert_eq!(form.status(), FormStatus::Sent);
        assert_eq!(form.fields(), &InquiryFields::default());
        assert_eq!(form.message(), None);

        let payload = form.relay().last.lock().unwrap().clone().unwrap();
        assert_eq!(payload.template_params.nombre, "Ana");
        assert_eq!(payload.template_params.producto_nombre, "Silla Roble Natural");
        assert_eq!(payload.template_params.producto_medidas, "80 x 45 x 50 cm");
        assert_eq!(
            payload.template_params.producto_imagen,
            "https://tienda.com.ar/muebles/silla-roble.jpg"
        );
    }

    #[tokio::test]
    async fn test_relay_failure_shows_fixed_message() {
        let mut form = form(FakeRelay::failing(500));
        form.set_fields(InquiryFields {
            nombre: "Ana".into(),
            email: "ana@example.com".into(),
            ..InquiryFields::default()
        });

        let err = form.submit(&product()).await.unwrap_err();

        assert!(err.is_relay_failure());
        assert_eq!(form.relay().calls(), 1);
        assert_eq!(form.status(), FormStatus::Failed);
        assert_eq!(form.message(), Some(FAILURE_MESSAGE));
        // Values stay so the visitor can retry.
        assert_eq!(form.fields().nombre, "Ana");
    }
}
