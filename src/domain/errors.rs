//! Domain error types
//!
//! This module defines the error hierarchy for the FHIR mapping layer.
//! Schema and shape errors surface immediately, converter validation
//! failures are aggregated into [`FhirError::RequestProcess`].

use thiserror::Error;

/// Prefix of every aggregated converter failure message
pub const REQUEST_PROCESS_PREFIX: &str =
    "The request cannot be processed due to the following issues:\n";

/// Main error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum FhirError {
    /// An attribute that is not declared on the object's type
    #[error("The attribute named `{attribute}` is not a valid property for `{type_name}`.")]
    InvalidAttribute {
        attribute: String,
        type_name: String,
    },

    /// Shape or nullability violation on a property
    #[error("{0}")]
    Property(String),

    /// Value of the wrong type stored in a property
    #[error("Expected '{expected}' but got '{actual}' for '{property}' property")]
    PropertyType {
        expected: String,
        actual: String,
        property: String,
    },

    /// Append or insert on a list already holding `count_max` elements
    #[error("The max size was exceeded for property {property} [{min}..{max}]")]
    PropertyMaxSize {
        property: String,
        min: u32,
        max: String,
    },

    /// Serialization format other than JSON
    #[error("The format '{0}' is not supported")]
    UnsupportedFormat(String),

    /// Document cannot be marshalled into the requested resource type
    #[error("{0}")]
    Marshalling(String),

    /// Invalid property declaration or unresolved type name
    #[error("Schema error: {0}")]
    Schema(String),

    /// Aggregated converter validation failure
    #[error("{}", format_request_errors(.0))]
    RequestProcess(Vec<String>),

    /// Audit identity required but absent
    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not offered by a converter
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl FhirError {
    /// Messages carried by an aggregated failure, empty for other variants
    pub fn issues(&self) -> &[String] {
        match self {
            FhirError::RequestProcess(errors) => errors,
            _ => &[],
        }
    }
}

fn format_request_errors(errors: &[String]) -> String {
    format!("{}{}", REQUEST_PROCESS_PREFIX, errors.join(",\n"))
}

// Conversion from std::io::Error
impl From<std::io::Error> for FhirError {
    fn from(err: std::io::Error) -> Self {
        FhirError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FhirError {
    fn from(err: serde_json::Error) -> Self {
        FhirError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FhirError {
    fn from(err: toml::de::Error) -> Self {
        FhirError::Configuration(format!("TOML parse error: {err}"))
    }
}
