//! # Inquiry Commands
//!
//! Submits the "Consultar disponibilidad" form of a product page.

use serde::Serialize;
use sofa_core::InquiryFields;
use sofa_inquiry::{FormStatus, InquiryForm, InquiryReceipt, InquiryRelay};
use tracing::info;

use super::ProductCard;
use crate::error::ApiError;
use crate::state::AppState;

/// Result of a delivered inquiry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryOutcome {
    pub status: FormStatus,
    pub receipt: InquiryReceipt,
    pub product: ProductCard,
}

/// Validates and sends an inquiry about the product named by `key`.
///
/// ## Errors
/// - `NOT_FOUND` for unknown products
/// - `VALIDATION_ERROR` with the inline message; the relay is not called
/// - `RELAY_ERROR` with "No se pudo enviar la consulta."
pub async fn inquire<R: InquiryRelay>(
    state: &AppState,
    relay: R,
    key: &str,
    fields: InquiryFields,
) -> Result<InquiryOutcome, ApiError> {
    let product = state.catalog().find(key)?;
    info!(product_id = %product.id, "inquire command");

    let mut form = InquiryForm::new(relay, state.config().relay.clone(), state.origin()?);
    form.set_fields(fields);
    let receipt = form.submit(product).await?;

    Ok(InquiryOutcome {
        status: form.status(),
        receipt,
        product: ProductCard::from(product),
    })
}
