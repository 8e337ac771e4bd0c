//! Remodel Core - declarative object-to-object mapping engine
//!
//! This crate translates one data model into another without hand-written
//! field-by-field glue: source types declare per-field mapping, validation,
//! and cast annotations through an explicit field table, and the engine
//! builds an intermediate tree, validates and coerces leaves, aggregates
//! every field error, and materializes the tree into the target type.
//!
//! # Main Components
//!
//! - **Error Handling**: aggregate field errors and fatal configuration or
//!   materialization failures, using `thiserror` and `anyhow`
//! - **Field Table**: the [`MapSource`] trait replacing runtime reflection
//! - **Mapping Engine**: recursive tree construction with per-leaf
//!   validation and coercion
//! - **Materialization**: serde-driven decoding of the finished tree into
//!   the target shape
//!
//! # Example
//!
//! ```no_run
//! use remodel_core::{apply, MapSource, Result, SourceField};
//! use serde::Deserialize;
//!
//! struct Source {
//!     amount: i64,
//! }
//!
//! impl MapSource for Source {
//!     fn fields(&self) -> Vec<SourceField<'_>> {
//!         vec![SourceField::new(
//!             "amount",
//!             "charge.amount,cast=string",
//!             "required,number,min=1",
//!             self.amount,
//!         )]
//!     }
//! }
//!
//! #[derive(Deserialize)]
//! struct Charge {
//!     amount: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Target {
//!     charge: Charge,
//! }
//!
//! fn example(source: &Source) -> Result<Target> {
//!     apply(source)
//! }
//! ```

pub mod error;
pub mod mapping;

// Re-export main types for convenience
pub use error::{Error, FieldError, FieldErrorKind, Result};
pub use mapping::{
    // Entry points
    apply, to_tree,

    // Field table
    FieldValue, MapSource, SourceField,

    // Mapping descriptors
    CastKind, MappingSpec,

    // Intermediate representation
    Scalar, Tree,

    // Strategy sets
    Validator, cast,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::Mapping {
            message: "test error".to_string(),
        };
        assert!(err.to_string().contains("test error"));
    }
}
