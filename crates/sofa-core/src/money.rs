//! # Money Module
//!
//! Provides the `Money` type for catalog prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The dataset writes prices as JSON numbers (149999.9, 85000).          │
//! │  Keeping them as f64 invites 0.1 + 0.2 = 0.30000000000000004.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    The dataset adapter converts once at load time;                     │
//! │    everything downstream works on i64 cents.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Display Format
//! Prices render the way `es-AR` renders ARS with no minimum fraction
//! digits: `$ 150.000`, `$ 1.250,5`, `$ 99,99`. The space after the symbol
//! is a no-break space (U+00A0).

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Currency symbol for ARS.
const SYMBOL: &str = "$";

/// Separator between symbol and amount (no-break space).
const SYMBOL_SEPARATOR: char = '\u{a0}';

/// Thousands separator in es-AR.
const GROUP_SEPARATOR: char = '.';

/// Decimal separator in es-AR.
const DECIMAL_SEPARATOR: char = ',';

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// ## Where Money is Used
/// ```text
/// catalogo.json "precio" ──► dataset adapter ──► Product.price
///                                                    │
///                  ┌─────────────────────────────────┴──────────────┐
///                  ▼                                                ▼
///        Card / detail view "$ 150.000"          Inquiry "producto_precio"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use sofa_core::money::Money;
    ///
    /// let price = Money::from_cents(8_500_000); // $ 85.000
    /// assert_eq!(price.cents(), 8_500_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole pesos, `None` on overflow.
    #[inline]
    pub const fn from_major(major: i64) -> Option<Self> {
        match major.checked_mul(100) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats the amount as an es-AR currency string.
    ///
    /// ## Example
    /// ```rust
    /// use sofa_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(15_000_000).format_ars(), "$\u{a0}150.000");
    /// assert_eq!(Money::from_cents(125_050).format_ars(), "$\u{a0}1.250,5");
    /// ```
    pub fn format_ars(&self) -> String {
        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }
        out.push_str(SYMBOL);
        out.push(SYMBOL_SEPARATOR);
        out.push_str(&group_thousands(self.major().unsigned_abs()));

        let minor = self.minor_part();
        if minor != 0 {
            out.push(DECIMAL_SEPARATOR);
            let digits = format!("{:02}", minor);
            out.push_str(digits.trim_end_matches('0'));
        }

        out
    }

    /// Plain decimal amount without grouping, as the relay template expects
    /// (`85000`, `1250.5`).
    pub fn to_plain_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let major = self.major().unsigned_abs();
        match self.minor_part() {
            0 => format!("{}{}", sign, major),
            minor => {
                let digits = format!("{:02}", minor);
                format!("{}{}.{}", sign, major, digits.trim_end_matches('0'))
            }
        }
    }
}

/// Inserts the es-AR thousands separator.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_ars())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major() {
        assert_eq!(Money::from_major(5), Some(Money::from_cents(500)));
        assert_eq!(Money::from_major(i64::MAX), None);
    }

    #[test]
    fn test_format_whole_amounts() {
        assert_eq!(Money::from_cents(0).format_ars(), "$\u{a0}0");
        assert_eq!(Money::from_cents(99_900).format_ars(), "$\u{a0}999");
        assert_eq!(Money::from_cents(100_000).format_ars(), "$\u{a0}1.000");
        assert_eq!(Money::from_cents(15_000_000).format_ars(), "$\u{a0}150.000");
        assert_eq!(Money::from_cents(123_456_700).format_ars(), "$\u{a0}1.234.567");
    }

    #[test]
    fn test_format_fractions_drop_trailing_zeros() {
        assert_eq!(Money::from_cents(125_050).format_ars(), "$\u{a0}1.250,5");
        assert_eq!(Money::from_cents(9_999).format_ars(), "$\u{a0}99,99");
        assert_eq!(Money::from_cents(101).format_ars(), "$\u{a0}1,01");
    }

    #[test]
    fn test_display_matches_format() {
        let price = Money::from_cents(64_000_000);
        assert_eq!(price.to_string(), price.format_ars());
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(8_500_000).to_plain_string(), "85000");
        assert_eq!(Money::from_cents(125_050).to_plain_string(), "1250.5");
        assert_eq!(Money::from_cents(5).to_plain_string(), "0.05");
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
    }
}
