//! Domain error types
//!
//! This module defines the error hierarchy for ADE Bridge. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main ADE Bridge error type
///
/// Every transform in the crate is pure, so none of these errors leave partial
/// side effects behind and none are retried internally.
#[derive(Debug, Error)]
pub enum AdeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A SQL template does not have the expected WHERE/ORDER structure
    #[error("Malformed query template: {0}")]
    TemplateMalformed(String),

    /// A caller-supplied date-time bound cannot be parsed
    #[error("Invalid date-time format: {0}")]
    InvalidDateFormat(String),

    /// A field the exchange schema marks as required is absent from the source row
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// The requested location scheme/id pair is not in the location directory
    #[error("Location not found: {scheme}/{id}")]
    LocationNotFound { scheme: String, id: String },

    /// The store type has no query for the requested operation
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Request parameter validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record source errors
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl AdeError {
    /// Whether the error stems from caller input rather than from the
    /// deployment's configuration or the record source
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            AdeError::InvalidDateFormat(_)
                | AdeError::Validation(_)
                | AdeError::LocationNotFound { .. }
                | AdeError::UnsupportedOperation(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AdeError {
    fn from(err: std::io::Error) -> Self {
        AdeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AdeError {
    fn from(err: serde_json::Error) -> Self {
        AdeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AdeError {
    fn from(err: toml::de::Error) -> Self {
        AdeError::Configuration(format!("TOML parse error: {err}"))
    }
}
