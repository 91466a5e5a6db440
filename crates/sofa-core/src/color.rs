//! Swatch colors for product finishes.
//!
//! Datasets usually name finishes ("Roble", "Gris claro") without a hex
//! value. The swatch falls back to a small table of known finishes, then to
//! a neutral gray.

use crate::types::Color;

/// Neutral swatch for unknown finishes.
pub const NEUTRAL_SWATCH: &str = "#D9D9D9";

/// Known finish names (lowercase) and their swatches.
const NAMED_FINISHES: &[(&str, &str)] = &[
    ("negro", "#000000"),
    ("blanco", "#FFFFFF"),
    ("gris", "#BDBDBD"),
    ("beige", "#E2D2B6"),
    ("madera", "#C9A27A"),
    ("gris claro", "#C8C8C8"),
    ("beige arena", "#E8DCC2"),
    ("roble", "#C8B7A6"),
    ("nogal", "#8B6B4F"),
    ("verde oliva", "#738074"),
];

/// Returns true for `#RGB` and `#RRGGBB` (case-insensitive).
pub fn is_hex(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Resolves the swatch for a finish.
///
/// Order: the color's own hex if valid, the named-finish table, the name
/// itself if it is a hex value, the neutral swatch.
pub fn swatch_hex(color: &Color) -> String {
    if let Some(hex) = color.hex.as_deref().filter(|h| is_hex(h)) {
        return hex.to_string();
    }
    named_swatch(&color.name).to_string()
}

/// Swatch for a finish name alone.
pub fn named_swatch(name: &str) -> &str {
    let key = name.trim().to_lowercase();
    if key.is_empty() {
        return NEUTRAL_SWATCH;
    }
    NAMED_FINISHES
        .iter()
        .find(|(finish, _)| *finish == key)
        .map(|(_, hex)| *hex)
        .unwrap_or_else(|| if is_hex(name.trim()) { name.trim() } else { NEUTRAL_SWATCH })
}
