//! Domain error types
//!
//! This module defines the error hierarchy for fhir-fetch. Errors are
//! domain-specific and don't expose third-party HTTP client types.

use thiserror::Error;

/// Main fhir-fetch error type
///
/// This is the primary error type used throughout the crate.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// FHIR server and resource errors
    #[error("FHIR error: {0}")]
    Fhir(#[from] FhirError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// HTTP status code carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Fhir(FhirError::RequestFailed { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// FHIR-specific errors
///
/// Errors that occur when talking to a FHIR server or when turning its
/// JSON into typed resources.
#[derive(Debug, Error)]
pub enum FhirError {
    /// No response was received from the server
    #[error("Failed to connect to FHIR server: {0}")]
    ConnectionFailed(String),

    /// The server answered with anything other than 200 OK
    #[error("Request to {url} failed with status {status}: {body}")]
    RequestFailed {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body could not be interpreted
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// A raw resource carries a different `resourceType` than requested
    #[error("Can not build {expected} from a resource of type {found}")]
    ResourceTypeMismatch { expected: String, found: String },

    /// A raw resource has no `resourceType` tag at all
    #[error("Resource has no resourceType, expected {0}")]
    MissingResourceType(String),

    /// The resource type is not one this client maps
    #[error("Unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    /// Pagination did not terminate within the configured ceiling
    #[error("Pagination exceeded the limit of {limit} pages")]
    PageLimitExceeded { limit: usize },

    /// A reference could not be resolved to a readable resource
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FetchError {
    fn from(err: toml::de::Error) -> Self {
        FetchError::Configuration(format!("TOML parse error: {err}"))
    }
}
