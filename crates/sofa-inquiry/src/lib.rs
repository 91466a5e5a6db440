//! # sofa-inquiry: Product Inquiries for the Storefront
//!
//! Sends the "Consultar disponibilidad" form of a product page to the
//! email relay.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inquiry Submission                               │
//! │                                                                         │
//! │  InquiryFields ──► sofa_core::validation ──✗──► inline message          │
//! │                          │                                              │
//! │                          ✓                                              │
//! │                          ▼                                              │
//! │  TemplateParams (form + product snapshot, absolute image URL)           │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  InquiryPayload { service_id, template_id, user_id, template_params }   │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  InquiryRelay::send ──► POST api.emailjs.com (one attempt)              │
//! │                          │                                              │
//! │                  ┌───────┴────────┐                                     │
//! │                  ▼                ▼                                     │
//! │          Sent (clear form)   Failed ("No se pudo enviar la consulta.")  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`form`] - Form state machine
//! - [`payload`] - Relay request body
//! - [`relay`] - Relay trait and the EmailJS client
//! - [`config`] - Relay account settings
//! - [`error`] - Inquiry error types

pub mod config;
pub mod error;
pub mod form;
pub mod payload;
pub mod relay;

pub use config::RelayConfig;
pub use error::{InquiryError, InquiryResult};
pub use form::{FormStatus, InquiryForm, InquiryReceipt, FAILURE_MESSAGE};
pub use payload::{parse_origin, InquiryPayload, TemplateParams};
pub use relay::{EmailJsRelay, InquiryRelay};
