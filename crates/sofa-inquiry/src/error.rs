//! # Inquiry Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inquiry Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Form          │  │   Relay         │  │     Setup               │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Validation     │  │  Rejected       │  │  InvalidConfig          │ │
//! │  │  (never sent)   │  │  Transport      │  │  InvalidOrigin          │ │
//! │  │                 │  │                 │  │  Serialization          │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sofa_core::ValidationError;
use thiserror::Error;

/// Result type alias for inquiry operations.
pub type InquiryResult<T> = Result<T, InquiryError>;

/// Everything that can go wrong while submitting an inquiry.
#[derive(Debug, Error)]
pub enum InquiryError {
    // =========================================================================
    // Form Errors
    // =========================================================================
    /// The form did not pass validation. The relay was not called.
    #[error("Invalid inquiry: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Relay Errors
    // =========================================================================
    /// The relay answered with a non-success status.
    #[error("Relay rejected the inquiry ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The request never got an answer (DNS, TLS, timeout, ...).
    #[error("Relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    // =========================================================================
    // Setup Errors
    // =========================================================================
    /// Relay settings are unusable.
    #[error("Invalid relay configuration: {0}")]
    InvalidConfig(String),

    /// The site origin cannot anchor image URLs.
    #[error("Invalid site origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InquiryError {
    /// Returns true for failures that happened after the form was accepted.
    pub fn is_relay_failure(&self) -> bool {
        matches!(
            self,
            InquiryError::Rejected { .. } | InquiryError::Transport(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = InquiryError::Rejected {
            status: 400,
            body: "The user ID is invalid".into(),
        };
        assert_eq!(
            err.to_string(),
            "Relay rejected the inquiry (400): The user ID is invalid"
        );
        assert!(err.is_relay_failure());

        let err: InquiryError = ValidationError::Required {
            field: "nombre".into(),
        }
        .into();
        assert!(!err.is_relay_failure());
    }
}
