//! # Text Normalizer
//!
//! Canonical, comparison-friendly form for every string the catalog
//! compares: search queries, titles, descriptions and category labels.
//!
//! ## Pipeline
//! ```text
//! "  Sofá Ñandú, 3 cuerpos! "
//!        │  NFD: á → a + U+0301, Ñ → N + U+0303
//!        ▼
//!        │  drop combining marks U+0300..=U+036F
//!        ▼
//!        │  ñ → n
//!        ▼
//!        │  keep ASCII letters, ASCII digits, whitespace
//!        ▼
//!        │  lowercase, trim
//!        ▼
//! "sofa nandu 3 cuerpos"
//! ```
//!
//! The output only contains ASCII alphanumerics and whitespace, so running
//! it through the pipeline again returns it unchanged.

use unicode_normalization::UnicodeNormalization;

/// Range of the "Combining Diacritical Marks" block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Normalizes a string for accent and case-insensitive comparison.
///
/// ## Example
/// ```rust
/// use sofa_core::normalize::normalize;
///
/// assert_eq!(normalize("Café México"), "cafe mexico");
/// assert_eq!(normalize("  ¡Sillón Ñandú!  "), "sillon nandu");
/// ```
pub fn normalize(input: &str) -> String {
    let folded: String = input
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .map(|c| if c == 'ñ' { 'n' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    folded.to_lowercase().trim().to_string()
}

/// Normalizes an optional string; absent input yields `""`.
pub fn normalize_opt(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}

/// Returns true if two labels are equal once normalized.
pub fn same_label(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
