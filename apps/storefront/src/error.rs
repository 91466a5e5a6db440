//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  storefront open /producto/99                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown product? ─── CoreError::ProductNotFound ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Relay failed? ─── InquiryError::Rejected ─────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: { "code": "NOT_FOUND", "message": "Product not found: 99" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sofa_core::validation::inline_message;
use sofa_core::{CoreError, DatasetError, RouteError};
use sofa_inquiry::{InquiryError, FAILURE_MESSAGE};

use crate::config::ConfigError;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: sofa-99"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or view not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The email relay could not deliver the inquiry
    RelayError,

    /// The product dataset could not be loaded
    DatasetError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(key) => ApiError::not_found("Product", &key),
            CoreError::Dataset(e) => e.into(),
            CoreError::Validation(e) => ApiError::validation(inline_message(&e)),
            CoreError::Route(e) => e.into(),
        }
    }
}

impl From<DatasetError> for ApiError {
    fn from(err: DatasetError) -> Self {
        tracing::error!("Dataset rejected: {}", err);
        ApiError::new(ErrorCode::DatasetError, err.to_string())
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::UnknownPath(path) => ApiError::not_found("View", &path),
            RouteError::InvalidLink { .. } => ApiError::validation(err.to_string()),
        }
    }
}

/// Converts inquiry errors to API errors.
///
/// Relay failures never leak transport details to the caller.
impl From<InquiryError> for ApiError {
    fn from(err: InquiryError) -> Self {
        match err {
            InquiryError::Validation(e) => ApiError::validation(inline_message(&e)),
            InquiryError::Rejected { .. } | InquiryError::Transport(_) => {
                ApiError::new(ErrorCode::RelayError, FAILURE_MESSAGE)
            }
            InquiryError::InvalidConfig(_)
            | InquiryError::InvalidOrigin { .. }
            | InquiryError::Serialization(_) => {
                tracing::error!("Inquiry setup failed: {}", err);
                ApiError::internal(err.to_string())
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use sofa_core::ValidationError;

    #[test]
    fn test_not_found_serialization() {
        let err: ApiError = CoreError::ProductNotFound("99".into()).into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 99");
    }

    #[test]
    fn test_validation_uses_inline_message() {
        let err: ApiError = InquiryError::Validation(ValidationError::InvalidFormat {
            field: "email".into(),
            reason: "bad".into(),
        })
        .into();
        assert_eq!(err, ApiError::validation("Ingrese un email válido"));
    }

    #[test]
    fn test_relay_failure_uses_fixed_message() {
        let err: ApiError = InquiryError::Rejected {
            status: 412,
            body: "template not found".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::RelayError);
        assert_eq!(err.message, "No se pudo enviar la consulta.");
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let err: ApiError = RouteError::UnknownPath("/carrito".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "[NotFound] View not found: /carrito");
    }
}
