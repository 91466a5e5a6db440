//! # Validation Module
//!
//! Validation of the inquiry (contact/quote) form.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inquiry Submission                                 │
//! │                                                                         │
//! │  InquiryFields                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_inquiry ← THIS MODULE                                         │
//! │       │                                                                 │
//! │       ├── email does not look like x@y.z → "Ingrese un email válido"   │
//! │       ├── nombre empty                   → "Ingrese su nombre"         │
//! │       ├── field too long                 → "... demasiado largo"       │
//! │       │                                                                 │
//! │       └── OK → relay called exactly once (sofa-inquiry)                 │
//! │                                                                         │
//! │  A failed validation never reaches the network.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sofa_core::validation::{validate_email, inline_message};
//!
//! assert!(validate_email("ana@example.com").is_ok());
//!
//! let err = validate_email("not-an-email").unwrap_err();
//! assert_eq!(inline_message(&err), "Ingrese un email válido");
//! ```

use crate::error::ValidationError;
use crate::types::InquiryFields;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Inline message for a malformed email.
pub const EMAIL_MESSAGE: &str = "Ingrese un email válido";

/// Inline message for a missing name.
pub const NAME_MESSAGE: &str = "Ingrese su nombre";

const MAX_NAME_LEN: usize = 120;
const MAX_CONTACT_LEN: usize = 120;
const MAX_NOTE_LEN: usize = 2000;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// Accepts any text containing `non-space@non-space.non-space`, the same
/// loose check browsers apply before submitting. The address is not trimmed
/// or rewritten.
///
/// ## Example
/// ```rust
/// use sofa_core::validation::validate_email;
///
/// assert!(validate_email("ana@example.com").is_ok());
/// assert!(validate_email("a@b.c").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// assert!(validate_email("ana@example").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.split_whitespace().any(looks_like_address) {
        return Ok(());
    }

    Err(ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "expected something like name@domain.tld".to_string(),
    })
}

/// One whitespace-free run matching `.+@.+\..+`.
fn looks_like_address(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();

    // The leftmost usable '@' leaves the most room for the domain.
    let Some(at) = chars.iter().skip(1).position(|&c| c == '@').map(|i| i + 1) else {
        return false;
    };

    chars
        .iter()
        .enumerate()
        .any(|(i, &c)| c == '.' && i >= at + 2 && i + 1 < chars.len())
}

/// Validates the contact name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 120 characters
pub fn validate_contact_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "nombre".to_string(),
        });
    }

    check_length("nombre", name, MAX_NAME_LEN)
}

fn check_length(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Form Validation
// =============================================================================

/// Validates the whole form, email first.
///
/// Returns the first failing rule; optional fields only have length limits.
pub fn validate_inquiry(fields: &InquiryFields) -> ValidationResult<()> {
    validate_email(&fields.email)?;
    validate_contact_name(&fields.nombre)?;
    check_length("email", &fields.email, MAX_CONTACT_LEN)?;
    check_length("telefono", &fields.telefono, MAX_CONTACT_LEN)?;
    check_length("ciudad", &fields.ciudad, MAX_CONTACT_LEN)?;
    check_length("nota", &fields.nota, MAX_NOTE_LEN)?;
    Ok(())
}

/// Spanish message shown next to the form for a validation failure.
pub fn inline_message(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::InvalidFormat { field, .. } if field == "email" => EMAIL_MESSAGE,
        ValidationError::Required { field } if field == "nombre" => NAME_MESSAGE,
        ValidationError::Required { field } if field == "email" => EMAIL_MESSAGE,
        ValidationError::TooLong { field, .. } if field == "nota" => "El mensaje es demasiado largo",
        ValidationError::TooLong { .. } => "El texto ingresado es demasiado largo",
        _ => "Revise los datos ingresados",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
