//! Error types for configuration assembly.

use thiserror::Error;

/// Configuration assembly error type.
///
/// Every variant is a validation failure; the message names the offending
/// field and, where one exists, the accepted alternative input.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A JSON-ish field could not be decoded as JSON nor as a literal.
    #[error("{field} is not valid JSON")]
    InvalidSyntax {
        /// Credential field name.
        field: String,
    },
    /// A field decoded to something other than an object.
    #[error("{field} must be a JSON object")]
    NotAnObject {
        /// Credential field name.
        field: String,
    },
    /// A decoded block lacks `provider` or an object-valued `config`.
    #[error("{field} must include 'provider' and 'config' object")]
    MissingShape {
        /// Credential field name.
        field: String,
    },
    /// A required sub-configuration could not be built from any input form.
    #[error(
        "{section} configuration is required. Provide either '{json_field}' or form fields ({form_fields})"
    )]
    MissingSection {
        /// Human readable section name.
        section: &'static str,
        /// JSON credential field accepted for this section.
        json_field: &'static str,
        /// Form fields accepted for this section.
        form_fields: &'static str,
    },
    /// Credential input was not a key/value object.
    #[error("credentials must be a JSON object")]
    InvalidCredentials,
    /// Assembler settings are out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl ConfigurationError {
    pub(crate) fn invalid_syntax(field: &str) -> Self {
        Self::InvalidSyntax {
            field: field.to_string(),
        }
    }

    pub(crate) fn not_an_object(field: &str) -> Self {
        Self::NotAnObject {
            field: field.to_string(),
        }
    }

    pub(crate) fn missing_shape(field: &str) -> Self {
        Self::MissingShape {
            field: field.to_string(),
        }
    }
}

/// Convenience result alias for configuration assembly.
pub type ConfigResult<T> = Result<T, ConfigurationError>;
