//! # Domain Types
//!
//! Canonical domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Dimensions    │   │     Color       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id / slug      │   │  height (cm)    │   │  name           │       │
//! │  │  title          │   │  width  (cm)    │   │  hex (optional) │       │
//! │  │  price (Money)  │   │  depth  (cm)    │   └─────────────────┘       │
//! │  │  category       │   │  text (legacy)  │                              │
//! │  │  images         │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │  InquiryFields  │       │
//! │                                              │  nombre, email  │       │
//! │                                              │  telefono, ...  │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every dataset variant is mapped into these shapes once, by
//! [`crate::dataset`]. Nothing downstream branches on schema version.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::color::swatch_hex;
use crate::money::Money;
use crate::PLACEHOLDER_IMAGE;

/// Color name shown when a product lists no finish.
pub const DEFAULT_COLOR_NAME: &str = "Tono";

const CATEGORY_LINE_SEPARATOR: &str = " • ";

// =============================================================================
// Color
// =============================================================================

/// A finish a product is offered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Color {
    /// Display name ("Gris claro", "Roble").
    pub name: String,

    /// Swatch color as `#RGB`/`#RRGGBB`, when the dataset provides one.
    pub hex: Option<String>,
}

impl Color {
    /// Creates a color without an explicit swatch.
    pub fn named(name: impl Into<String>) -> Self {
        Color {
            name: name.into(),
            hex: None,
        }
    }
}

// =============================================================================
// Specification
// =============================================================================

/// One row of a product's specifications block ("Material: Roble").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

impl Specification {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Specification {
            label: label.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Product measurements in centimeters.
///
/// Structured datasets fill the numbers; older ones only carry a free-text
/// description, kept in `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dimensions {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub text: Option<String>,
}

impl Dimensions {
    /// Dimensions described only by free text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Dimensions {
            text: Some(text.into()),
            ..Dimensions::default()
        }
    }

    /// Returns true when at least one measurement is known.
    pub fn is_structured(&self) -> bool {
        self.height.is_some() || self.width.is_some() || self.depth.is_some()
    }

    /// Returns true when nothing at all is known.
    pub fn is_empty(&self) -> bool {
        !self.is_structured() && self.text.as_deref().map_or(true, |t| t.trim().is_empty())
    }

    /// Compact label for product cards: `80 × 200 × 90 cm`.
    pub fn card_label(&self) -> Option<String> {
        if self.is_structured() {
            return Some(format!(
                "{} × {} × {} cm",
                format_measure(self.height),
                format_measure(self.width),
                format_measure(self.depth)
            ));
        }
        self.text.clone().filter(|t| !t.trim().is_empty())
    }

    /// One measurement per line, as written into inquiry emails.
    pub fn detail_lines(&self) -> String {
        if !self.is_structured() {
            return self.text.clone().unwrap_or_default();
        }
        format!(
            "Alto: {} cm\nAncho: {} cm\nProfundidad: {} cm",
            format_measure(self.height),
            format_measure(self.width),
            format_measure(self.depth)
        )
    }
}

/// Renders a measurement without a trailing `.0`.
fn format_measure(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product, in canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier, stable across sessions.
    pub id: String,

    /// Optional secondary key accepted by product deep links.
    pub slug: Option<String>,

    /// Display name.
    pub title: String,

    /// Price in ARS.
    pub price: Money,

    /// Primary category label (falls back to "Otros").
    pub category: String,

    /// Every label the record carries, primary first.
    pub categories: Vec<String>,

    pub dimensions: Dimensions,

    /// Finishes, first one is the primary color.
    pub colors: Vec<Color>,

    /// Image paths, first one is the cover.
    pub images: Vec<String>,

    pub short_description: Option<String>,

    pub description: Option<String>,

    /// Extended copy for the detail view.
    pub long_description: Option<String>,

    /// Label/value rows of the "Especificaciones" block, in dataset order.
    pub specifications: Vec<Specification>,
}

impl Product {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Cover image, or the placeholder when the gallery is empty.
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Full gallery, never empty.
    pub fn gallery(&self) -> Vec<&str> {
        if self.images.is_empty() {
            return vec![PLACEHOLDER_IMAGE];
        }
        self.images.iter().map(String::as_str).collect()
    }

    /// First listed finish.
    pub fn primary_color(&self) -> Option<&Color> {
        self.colors.first()
    }

    /// Name of the primary finish, "Tono" when none is listed.
    pub fn primary_color_name(&self) -> &str {
        self.primary_color()
            .map(|c| c.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_COLOR_NAME)
    }

    /// Swatch for the primary finish.
    pub fn primary_swatch(&self) -> String {
        match self.primary_color() {
            Some(color) => swatch_hex(color),
            None => swatch_hex(&Color::named(DEFAULT_COLOR_NAME)),
        }
    }

    /// Copy for the detail view: the long description, else the
    /// description, else the short description.
    pub fn detail_description(&self) -> Option<&str> {
        self.long_description
            .as_deref()
            .or(self.description.as_deref())
            .or(self.short_description.as_deref())
    }

    /// Label line under the detail title: the category, or every label
    /// joined with " • " when the record carries several.
    pub fn category_line(&self) -> String {
        if self.categories.len() > 1 {
            self.categories.join(CATEGORY_LINE_SEPARATOR)
        } else {
            self.category.clone()
        }
    }

    /// Returns true if a deep-link key names this product (id or slug).
    pub fn matches_key(&self, key: &str) -> bool {
        self.id == key || self.slug.as_deref() == Some(key)
    }

    /// Returns true if the product carries `label`, as primary category or
    /// in its label list.
    pub fn has_category(&self, label: &str) -> bool {
        self.category == label || self.categories.iter().any(|c| c == label)
    }

    /// Fields the catalog search looks into, not yet normalized.
    pub fn searchable_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.title.as_str())];
        if let Some(short) = &self.short_description {
            fields.push(Cow::Borrowed(short.as_str()));
        }
        if let Some(description) = &self.description {
            fields.push(Cow::Borrowed(description.as_str()));
        }
        fields.push(Cow::Borrowed(self.category.as_str()));
        if let Some(color) = self.primary_color() {
            fields.push(Cow::Borrowed(color.name.as_str()));
        }
        if let Some(label) = self.dimensions.card_label() {
            fields.push(Cow::Owned(label));
        }
        fields
    }
}

// =============================================================================
// Inquiry Fields
// =============================================================================

/// Values of the contact/quote form.
///
/// Field names follow the relay template (`nombre`, `email`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InquiryFields {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub ciudad: String,
    /// Free-text message.
    pub nota: String,
}

impl InquiryFields {
    /// Resets every field, as after a successful submission.
    pub fn clear(&mut self) {
        *self = InquiryFields::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a product with only the fields a test cares about.
    pub(crate) fn product(id: &str, title: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            slug: None,
            title: title.to_string(),
            price: Money::from_cents(10_000_000),
            category: category.to_string(),
            categories: vec![category.to_string()],
            dimensions: Dimensions::default(),
            colors: Vec::new(),
            images: Vec::new(),
            short_description: None,
            description: None,
            long_description: None,
            specifications: Vec::new(),
        }
    }

    #[test]
    fn test_gallery_falls_back_to_placeholder() {
        let mut p = product("1", "Sofá", "Sofás");
        assert_eq!(p.primary_image(), PLACEHOLDER_IMAGE);
        assert_eq!(p.gallery(), vec![PLACEHOLDER_IMAGE]);

        p.images = vec!["/muebles/a.jpg".into(), "/muebles/b.jpg".into()];
        assert_eq!(p.primary_image(), "/muebles/a.jpg");
        assert_eq!(p.gallery().len(), 2);
    }

    #[test]
    fn test_primary_color_name_fallback() {
        let mut p = product("1", "Sofá", "Sofás");
        assert_eq!(p.primary_color_name(), DEFAULT_COLOR_NAME);

        p.colors = vec![Color::named("Gris claro"), Color::named("Negro")];
        assert_eq!(p.primary_color_name(), "Gris claro");
        assert_eq!(p.primary_swatch(), "#C8C8C8");
    }

    #[test]
    fn test_detail_description_fallback_chain() {
        let mut p = product("1", "Sofá", "Sofás");
        assert_eq!(p.detail_description(), None);

        p.short_description = Some("Tres cuerpos".into());
        assert_eq!(p.detail_description(), Some("Tres cuerpos"));

        p.description = Some("Estructura de pino".into());
        assert_eq!(p.detail_description(), Some("Estructura de pino"));

        p.long_description = Some("Estructura de pino seleccionado y pana".into());
        assert_eq!(
            p.detail_description(),
            Some("Estructura de pino seleccionado y pana")
        );
    }

    #[test]
    fn test_category_line() {
        let mut p = product("1", "Mesa Ratona", "Mesas");
        assert_eq!(p.category_line(), "Mesas");

        p.categories = vec!["Mesas".into(), "Living".into()];
        assert_eq!(p.category_line(), "Mesas • Living");
    }

    #[test]
    fn test_matches_key_by_id_or_slug() {
        let mut p = product("12", "Sofá Escandinavo", "Sofás");
        p.slug = Some("sofa-escandinavo".into());
        assert!(p.matches_key("12"));
        assert!(p.matches_key("sofa-escandinavo"));
        assert!(!p.matches_key("13"));
    }

    #[test]
    fn test_dimension_labels() {
        let dims = Dimensions {
            height: Some(80.0),
            width: Some(200.5),
            depth: Some(90.0),
            text: None,
        };
        assert_eq!(dims.card_label().unwrap(), "80 × 200.5 × 90 cm");
        assert_eq!(
            dims.detail_lines(),
            "Alto: 80 cm\nAncho: 200.5 cm\nProfundidad: 90 cm"
        );

        let legacy = Dimensions::from_text("200 x 90 cm");
        assert!(!legacy.is_structured());
        assert_eq!(legacy.card_label().unwrap(), "200 x 90 cm");
        assert_eq!(legacy.detail_lines(), "200 x 90 cm");

        assert!(Dimensions::default().is_empty());
        assert_eq!(Dimensions::default().card_label(), None);
    }

    #[test]
    fn test_searchable_fields_include_color_and_dimensions() {
        let mut p = product("1", "Mesa", "Mesas");
        p.description = Some("Tapa maciza".into());
        p.colors = vec![Color::named("Nogal")];
        p.dimensions = Dimensions::from_text("120 x 80");

        let fields: Vec<String> = p.searchable_fields().into_iter().map(|f| f.into_owned()).collect();
        assert_eq!(fields, vec!["Mesa", "Tapa maciza", "Mesas", "Nogal", "120 x 80"]);
    }

    #[test]
    fn test_inquiry_fields_clear() {
        let mut fields = InquiryFields {
            nombre: "Ana".into(),
            email: "ana@example.com".into(),
            ..InquiryFields::default()
        };
        fields.clear();
        assert_eq!(fields, InquiryFields::default());
    }
}
