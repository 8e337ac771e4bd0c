//! Error types for the Remodel core library
//!
//! This module defines the error handling system for Remodel, using thiserror
//! for ergonomic error definitions and anyhow as the source type for
//! configuration failures. Per-field problems are collected as [`FieldError`]
//! values and aggregated into a single [`Error::Mapping`] so a caller sees
//! every offending field in one pass.

use std::fmt;
use thiserror::Error;

/// Main error type for Remodel operations
#[derive(Error, Debug)]
pub enum Error {
    /// Aggregate of every field-level validation or cast failure in one call
    #[error("{message}")]
    Mapping { message: String },

    /// Invalid mapping or validation annotation
    ///
    /// Raised for declaration mistakes: a malformed target path, an unknown
    /// cast kind, an invalid regular expression, or a target path that
    /// collides with an already-written scalar. These abort the call and are
    /// never mixed into the field-error aggregate.
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The finished tree could not be decoded into the target shape
    #[error("Materialization failed: {message}")]
    Materialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Separator between rendered field errors in the aggregate message
pub const AGGREGATE_SEPARATOR: &str = " || ";

/// Classification of a single field-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// A `required` constraint was violated
    Required,
    /// A numeric or string-length bound was violated
    Range,
    /// An email or pattern match failed
    Format,
    /// The value's kind is incompatible with the requested validator
    Type,
    /// Coercion between primitive kinds failed
    Cast,
}

/// A single field-level validation or cast failure
///
/// Rendered with the fixed template
/// `[field: <key> ] error mapping field | [cause: <cause> ]` and joined into
/// the aggregate with [`AGGREGATE_SEPARATOR`]. Pure data, no shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub display_key: String,
    pub cause: String,
}

impl FieldError {
    pub fn new(kind: FieldErrorKind, display_key: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            kind,
            display_key: display_key.into(),
            cause: cause.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[field: {} ] error mapping field | [cause: {} ]",
            self.display_key, self.cause
        )
    }
}

impl Error {
    /// Join every field error into one combined mapping failure
    ///
    /// The caller is expected to check for emptiness first; an empty slice
    /// still produces a `Mapping` error with an empty message.
    pub fn aggregate(errors: &[FieldError]) -> Self {
        let message = errors
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join(AGGREGATE_SEPARATOR);
        Error::Mapping { message }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Materialization {
            message: err.to_string(),
            source: err,
        }
    }
}
