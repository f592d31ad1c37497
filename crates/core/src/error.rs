//! Error types for the trie search workspace
//!
//! All fallible operations return [`Result<T>`]. Errors are never retried or
//! recovered internally; they propagate to the caller before the failing call
//! commits anything to the index.

use crate::key_field::{KeyField, PathParseError};
use thiserror::Error;

/// Boxed source error carried by configuration failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for trie search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the index
#[derive(Debug, Error)]
pub enum Error {
    /// The index was asked to do something its configuration does not allow
    ///
    /// Raised when a reducer is supplied without an explicit identity, when a
    /// custom identity function fails, or when a record that cannot be
    /// field-addressed is inserted where field access is required.
    #[error("configuration error: {reason}")]
    Configuration {
        /// What went wrong
        reason: String,
        /// Underlying failure, if any
        #[source]
        source: Option<BoxError>,
    },

    /// A key field needed for identity derivation resolved to nothing
    #[error("missing value for key field '{field}'")]
    MissingValue {
        /// The field that was absent or null
        field: KeyField,
    },

    /// A key-field string could not be parsed
    #[error("invalid key field: {0}")]
    InvalidKeyField(#[from] PathParseError),
}

impl Error {
    /// Create a configuration error without a source
    pub fn configuration(reason: impl Into<String>) -> Self {
        Error::Configuration {
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a configuration error wrapping an underlying failure
    pub fn configuration_with_source(reason: impl Into<String>, source: BoxError) -> Self {
        Error::Configuration {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Create a missing-value error for `field`
    pub fn missing_value(field: KeyField) -> Self {
        Error::MissingValue { field }
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    /// Check if this is a missing-value error
    pub fn is_missing_value(&self) -> bool {
        matches!(self, Error::MissingValue { .. })
    }
}
