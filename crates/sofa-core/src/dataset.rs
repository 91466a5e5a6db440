//! # Dataset Adapter
//!
//! Maps every product-record variant found in the bundled catalog into the
//! canonical [`Product`] shape, once, at load time.
//!
//! ## Variants Handled
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │  Source record               │  Canonical Product                        │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │  id: 12 | "sofa-12"          │  id: "12" | "sofa-12"                     │
//! │  titulo | nombre             │  title                                    │
//! │  precio: 85000 | "85000"     │  price: Money (cents)                     │
//! │  categoria | categorias[]    │  category (+ categories), else "Otros"    │
//! │  medidas {alto,ancho,prof.}  │  dimensions.{height,width,depth}          │
//! │  medidas "200 x 90 cm"       │  dimensions.text                          │
//! │  colores [{nombre|name,      │  colors [{name, hex}]                     │
//! │            hex|colorHex}]    │                                           │
//! │  colores ["Gris"] | color    │  colors [{name, hex: None}]               │
//! │  imagenes[] | imagen         │  images                                   │
//! │  descripcionCorta            │  short_description                        │
//! │  descripcionLarga            │  long_description                         │
//! │  especificaciones {k: v}     │  specifications [{label, value}]          │
//! │  material | acabado | peso   │  specifications, when the map is absent   │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! Downstream code never branches on schema version.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog::Catalog;
use crate::error::DatasetError;
use crate::money::Money;
use crate::types::{Color, Dimensions, Product, Specification};
use crate::FALLBACK_CATEGORY;

// =============================================================================
// Raw Record Shapes
// =============================================================================

/// A product record as written in any dataset variant.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    id: Option<RawKey>,
    slug: Option<RawKey>,
    titulo: Option<String>,
    nombre: Option<String>,
    precio: Option<Value>,
    categoria: Option<String>,
    categorias: Option<Vec<String>>,
    medidas: Option<RawMedidas>,
    colores: Option<Vec<RawColor>>,
    color: Option<String>,
    imagenes: Option<Vec<String>>,
    imagen: Option<String>,
    descripcion_corta: Option<String>,
    descripcion: Option<String>,
    descripcion_larga: Option<String>,
    especificaciones: Option<Map<String, Value>>,
    material: Option<Value>,
    acabado: Option<Value>,
    peso: Option<Value>,
}

/// Identifiers appear both as numbers and strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKey {
    Number(serde_json::Number),
    Text(String),
}

impl RawKey {
    fn into_key(self) -> Option<String> {
        let key = match self {
            RawKey::Number(n) => n.to_string(),
            RawKey::Text(s) => s.trim().to_string(),
        };
        (!key.is_empty()).then_some(key)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMedidas {
    Structured {
        alto: Option<RawMeasure>,
        ancho: Option<RawMeasure>,
        profundidad: Option<RawMeasure>,
    },
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMeasure {
    Number(f64),
    Text(String),
}

impl RawMeasure {
    fn centimeters(&self) -> Option<f64> {
        match self {
            RawMeasure::Number(n) => Some(*n),
            RawMeasure::Text(s) => s.trim().trim_end_matches("cm").trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawColor {
    Detailed {
        nombre: Option<String>,
        name: Option<String>,
        hex: Option<String>,
        #[serde(rename = "colorHex")]
        color_hex: Option<String>,
    },
    Name(String),
}

impl RawColor {
    fn into_color(self) -> Option<Color> {
        match self {
            RawColor::Detailed {
                nombre,
                name,
                hex,
                color_hex,
            } => {
                let name = non_blank(nombre).or_else(|| non_blank(name));
                let hex = non_blank(hex).or_else(|| non_blank(color_hex));
                if name.is_none() && hex.is_none() {
                    return None;
                }
                Some(Color {
                    name: name.unwrap_or_default(),
                    hex,
                })
            }
            RawColor::Name(name) => non_blank(Some(name)).map(Color::named),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Parses a JSON array of product records into canonical products.
///
/// ## Errors
/// - [`DatasetError::Parse`] if the document is not an array of objects
/// - [`DatasetError::MissingId`] / [`DatasetError::DuplicateId`] on broken keys
/// - [`DatasetError::InvalidPrice`] / [`DatasetError::NegativePrice`]
pub fn load_products(json: &str) -> Result<Vec<Product>, DatasetError> {
    let records: Vec<RawProduct> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut products = Vec::with_capacity(records.len());

    for (index, raw) in records.into_iter().enumerate() {
        let product = adapt(index, raw)?;
        if !seen.insert(product.id.clone()) {
            return Err(DatasetError::DuplicateId(product.id));
        }
        products.push(product);
    }

    Ok(products)
}

/// Parses a dataset and wraps it in a [`Catalog`].
pub fn load_catalog(json: &str) -> Result<Catalog, DatasetError> {
    Ok(Catalog::new(load_products(json)?))
}

/// Maps one raw record into the canonical shape.
fn adapt(index: usize, raw: RawProduct) -> Result<Product, DatasetError> {
    let id = raw
        .id
        .and_then(RawKey::into_key)
        .ok_or(DatasetError::MissingId { index })?;

    let price = adapt_price(&id, raw.precio)?;

    let title = non_blank(raw.titulo)
        .or_else(|| non_blank(raw.nombre))
        .unwrap_or_else(|| format!("Producto {}", id));

    let (category, categories) = adapt_categories(raw.categoria, raw.categorias);

    let dimensions = match raw.medidas {
        Some(RawMedidas::Structured {
            alto,
            ancho,
            profundidad,
        }) => Dimensions {
            height: alto.as_ref().and_then(RawMeasure::centimeters),
            width: ancho.as_ref().and_then(RawMeasure::centimeters),
            depth: profundidad.as_ref().and_then(RawMeasure::centimeters),
            text: None,
        },
        Some(RawMedidas::Text(text)) if !text.trim().is_empty() => Dimensions::from_text(text.trim()),
        _ => Dimensions::default(),
    };

    let mut colors: Vec<Color> = raw
        .colores
        .unwrap_or_default()
        .into_iter()
        .filter_map(RawColor::into_color)
        .collect();
    if colors.is_empty() {
        colors.extend(non_blank(raw.color).map(Color::named));
    }

    let mut images: Vec<String> = raw
        .imagenes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|img| non_blank(Some(img)))
        .collect();
    if images.is_empty() {
        images.extend(non_blank(raw.imagen));
    }

    Ok(Product {
        id,
        slug: raw.slug.and_then(RawKey::into_key),
        title,
        price,
        category,
        categories,
        dimensions,
        colors,
        images,
        short_description: non_blank(raw.descripcion_corta),
        description: non_blank(raw.descripcion),
        long_description: non_blank(raw.descripcion_larga),
        specifications: adapt_specifications(
            raw.especificaciones,
            [("Material", raw.material), ("Acabado", raw.acabado), ("Peso", raw.peso)],
        ),
    })
}

/// Converts a JSON price into cents. A missing price is zero.
fn adapt_price(id: &str, precio: Option<Value>) -> Result<Money, DatasetError> {
    let price = match &precio {
        None | Some(Value::Null) => return Ok(Money::zero()),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(whole) => Money::from_major(whole),
            None => n.as_f64().and_then(money_from_float),
        },
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().and_then(money_from_float),
        Some(_) => None,
    };

    let Some(price) = price else {
        return Err(DatasetError::InvalidPrice {
            id: id.to_string(),
            price: precio.map(|v| v.to_string()).unwrap_or_default(),
        });
    };

    if price.is_negative() {
        return Err(DatasetError::NegativePrice {
            id: id.to_string(),
            price: price.to_plain_string(),
        });
    }

    Ok(price)
}

/// Rounds a decimal amount to cents. Non-finite and out-of-range amounts
/// have no cent value.
fn money_from_float(amount: f64) -> Option<Money> {
    let cents = (amount * 100.0).round();
    // i64::MAX as f64 rounds up to 2^63, itself out of range.
    if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
        return None;
    }
    Some(Money::from_cents(cents as i64))
}

/// Reads the specifications map in dataset order. Records without one fall
/// back to their loose material, finish and weight fields.
fn adapt_specifications(
    map: Option<Map<String, Value>>,
    loose: [(&str, Option<Value>); 3],
) -> Vec<Specification> {
    let rows: Vec<Specification> = map
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(label, value)| {
            let label = label.trim();
            let value = spec_text(value)?;
            (!label.is_empty()).then(|| Specification::new(label, value))
        })
        .collect();
    if !rows.is_empty() {
        return rows;
    }

    loose
        .into_iter()
        .filter_map(|(label, value)| Some(Specification::new(label, spec_text(value?)?)))
        .collect()
}

/// Renders a specification value; blanks and nulls are dropped.
fn spec_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => non_blank(Some(s)),
        other => Some(other.to_string()),
    }
}

/// Picks the primary category and the full label list.
fn adapt_categories(categoria: Option<String>, categorias: Option<Vec<String>>) -> (String, Vec<String>) {
    let mut labels: Vec<String> = Vec::new();
    for label in non_blank(categoria)
        .into_iter()
        .chain(categorias.unwrap_or_default().into_iter().filter_map(|c| non_blank(Some(c))))
    {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    if labels.is_empty() {
        labels.push(FALLBACK_CATEGORY.to_string());
    }
    (labels[0].clone(), labels)
}

/// Trims and drops blank strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
