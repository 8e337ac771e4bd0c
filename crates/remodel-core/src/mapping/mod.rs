//! Mapping engine: declarative object-to-object translation
//!
//! This module implements the core mapping functionality: walking a source
//! value's field table, building the intermediate tree with per-field
//! validation and coercion, aggregating field errors, and materializing the
//! tree into the target type.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod caster;
pub mod materialize;
pub mod source;
pub mod spec;
pub mod tree;
pub mod validator;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

pub use builder::TreeBuilder;
pub use caster::cast;
pub use materialize::materialize;
pub use source::{FieldValue, MapSource, SourceField};
pub use spec::{CastKind, MappingSpec, SKIP_MARKER};
pub use tree::{Scalar, Tree};
pub use validator::Validator;

/// Map a source value into a freshly materialized target value
///
/// This is the primary public API. The walk visits every annotated field,
/// validates and coerces leaves, and aggregates every field-level failure
/// into a single [`Error::Mapping`] so the caller sees all problems in one
/// pass; no target value is produced in that case. Configuration and
/// materialization errors are returned alone.
///
/// # Example
///
/// ```
/// use remodel_core::{apply, FieldValue, MapSource, SourceField};
/// use serde::Deserialize;
///
/// struct Order {
///     id: i64,
///     note: Option<String>,
/// }
///
/// impl MapSource for Order {
///     fn fields(&self) -> Vec<SourceField<'_>> {
///         vec![
///             SourceField::new("id", "order.id,cast=string", "required,number,min=1", self.id),
///             SourceField::new("note", "order.note", "", FieldValue::opt_text(self.note.as_deref())),
///         ]
///     }
/// }
///
/// #[derive(Deserialize)]
/// struct OrderDoc {
///     order: OrderBody,
/// }
///
/// #[derive(Deserialize)]
/// struct OrderBody {
///     id: String,
///     note: Option<String>,
/// }
///
/// # fn main() -> remodel_core::Result<()> {
/// let source = Order { id: 7, note: None };
/// let doc: OrderDoc = apply(&source)?;
/// assert_eq!(doc.order.id, "7");
/// assert!(doc.order.note.is_none());
/// # Ok(())
/// # }
/// ```
pub fn apply<S, T>(source: &S) -> Result<T>
where
    S: MapSource,
    T: DeserializeOwned,
{
    let tree = to_tree(source)?;
    materialize(tree)
}

/// Build the intermediate tree without materializing it
///
/// Fails with the same aggregated [`Error::Mapping`] as [`apply`] when any
/// field error is found.
pub fn to_tree<S>(source: &S) -> Result<Tree>
where
    S: MapSource,
{
    let (tree, errors) = TreeBuilder::new().build(source)?;
    if !errors.is_empty() {
        log::warn!("mapping produced {} field error(s)", errors.len());
        return Err(Error::aggregate(&errors));
    }
    Ok(tree)
}
