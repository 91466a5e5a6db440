//! # Error Types
//!
//! Domain-specific error types for sofa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sofa-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Inquiry form validation failures               │
//! │  ├── DatasetError     - Bundled dataset does not fit the schema        │
//! │  └── RouteError       - Deep link cannot be resolved                   │
//! │                                                                         │
//! │  sofa-inquiry errors (separate crate)                                  │
//! │  └── InquiryError     - Relay submission failures                      │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stdout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core catalog errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product matches the id or slug of a deep link.
    ///
    /// ## When This Occurs
    /// - `/producto/{key}` with a key that is neither an id nor a slug
    /// - A stale link to a product removed from the dataset
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The dataset could not be adapted.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A deep link could not be parsed.
    #[error("Route error: {0}")]
    Route(#[from] RouteError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The Spanish text shown next to the form comes from
/// [`crate::validation::inline_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Dataset Error
// =============================================================================

/// Errors raised while adapting the bundled dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The document is not a JSON array of product records.
    #[error("Dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Record at `index` has no usable identifier.
    #[error("Product at position {index} has no id")]
    MissingId { index: usize },

    /// Two records share an identifier.
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    /// Price is neither a number nor a numeric string.
    #[error("Product {id} has an unreadable price: {price}")]
    InvalidPrice { id: String, price: String },

    /// Prices must never be negative.
    #[error("Product {id} has a negative price: {price}")]
    NegativePrice { id: String, price: String },
}

// =============================================================================
// Route Error
// =============================================================================

/// Errors raised while parsing a deep link.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The link is not a URL or path.
    #[error("Invalid link '{link}': {reason}")]
    InvalidLink { link: String, reason: String },

    /// The path does not belong to any view.
    #[error("No view at path: {0}")]
    UnknownPath(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("sofa-99".to_string());
        assert_eq!(err.to_string(), "Product not found: sofa-99");

        let err = DatasetError::NegativePrice {
            id: "7".to_string(),
            price: "-10".to_string(),
        };
        assert_eq!(err.to_string(), "Product 7 has a negative price: -10");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "nombre".to_string(),
        };
        assert_eq!(err.to_string(), "nombre is required");
        assert_eq!(err.field(), "nombre");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
