//! # Relay Payload
//!
//! The JSON body the EmailJS REST endpoint expects.
//!
//! ## Shape
//! ```text
//! {
//!   "service_id":  "service_..",
//!   "template_id": "template_..",
//!   "user_id":     "<public key>",
//!   "template_params": {
//!     "nombre", "email", "telefono", "ciudad", "nota",         ◄── form
//!     "producto_id", "producto_nombre", "producto_precio",      ◄── product
//!     "producto_color", "producto_medidas",                         snapshot
//!     "producto_categoria", "producto_imagen"
//!   }
//! }
//! ```

use serde::Serialize;
use sofa_core::{InquiryFields, Product};
use url::Url;

use crate::config::RelayConfig;
use crate::error::{InquiryError, InquiryResult};

/// Body of one relay request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryPayload {
    pub service_id: String,
    pub template_id: String,
    /// The account's public key.
    pub user_id: String,
    pub template_params: TemplateParams,
}

/// Variables substituted into the email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub ciudad: String,
    pub nota: String,

    pub producto_id: String,
    pub producto_nombre: String,
    /// Plain decimal price, e.g. `"85000"`.
    pub producto_precio: String,
    pub producto_color: String,
    /// One measurement per line (`Alto: 80 cm` ...).
    pub producto_medidas: String,
    pub producto_categoria: String,
    /// Absolute URL of the cover image, empty when the product has none.
    pub producto_imagen: String,
}

impl TemplateParams {
    /// Snapshots the form values and the product they ask about.
    pub fn new(fields: &InquiryFields, product: &Product, origin: &Url) -> InquiryResult<Self> {
        let producto_imagen = match product.images.first() {
            Some(image) => absolute_url(origin, image)?,
            None => String::new(),
        };

        Ok(TemplateParams {
            nombre: fields.nombre.clone(),
            email: fields.email.clone(),
            telefono: fields.telefono.clone(),
            ciudad: fields.ciudad.clone(),
            nota: fields.nota.clone(),
            producto_id: product.id.clone(),
            producto_nombre: product.title.clone(),
            producto_precio: product.price.to_plain_string(),
            producto_color: product
                .primary_color()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            producto_medidas: product.dimensions.detail_lines(),
            producto_categoria: product.category.clone(),
            producto_imagen,
        })
    }
}

impl InquiryPayload {
    pub fn new(config: &RelayConfig, template_params: TemplateParams) -> Self {
        InquiryPayload {
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            user_id: config.public_key.clone(),
            template_params,
        }
    }
}

/// Parses the site origin images are resolved against.
pub fn parse_origin(origin: &str) -> InquiryResult<Url> {
    let invalid = |reason: String| InquiryError::InvalidOrigin {
        origin: origin.to_string(),
        reason,
    };

    let url = Url::parse(origin).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("cannot anchor relative paths".to_string()));
    }
    Ok(url)
}

/// Resolves an image path against the origin. Absolute URLs pass through.
fn absolute_url(origin: &Url, path: &str) -> InquiryResult<String> {
    origin
        .join(path)
        .map(String::from)
        .map_err(|e| InquiryError::InvalidOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
}
