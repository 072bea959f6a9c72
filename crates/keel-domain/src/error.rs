//! Error handling types

use crate::validation::ValidationFailure;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Machine-readable error category, stable across message changes.
///
/// Outer boundary layers translate an [`Error`] into a structured response
/// from `kind()` + `to_string()` + `metadata()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A component or specification was configured in a way that cannot run
    Configuration,
    /// Input or entity state failed validation
    Validation,
    /// A resource required to be present was absent
    NotFound,
    /// An argument to an operation was rejected
    InvalidArgument,
    /// The persistence adapter failed
    Store,
    /// An internal invariant was breached
    Internal,
}

/// Main error type for the Keel toolkit
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration of a specification or component
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Validation rejected an input; carries every field-level failure
    #[error("Validation failed: {} failure(s)", failures.len())]
    Validation {
        /// The individual field-level failures, in evaluation order
        failures: Vec<ValidationFailure>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Persistence adapter operation error
    #[error("Store error: {message}")]
    Store {
        /// Description of the store error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error aggregating the given failures
    pub fn validation(failures: Vec<ValidationFailure>) -> Self {
        Self::Validation { failures }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Stable category for boundary translation
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Store { .. } => ErrorKind::Store,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Named metadata for structured error responses.
    ///
    /// Validation errors expose one entry per field failure; not-found
    /// errors expose the missing resource. Other kinds carry no metadata
    /// beyond their message.
    pub fn metadata(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Validation { failures } => failures
                .iter()
                .map(|f| ("failure", f.to_string()))
                .collect(),
            Self::NotFound { resource } => vec![("resource", resource.clone())],
            _ => Vec::new(),
        }
    }
}
