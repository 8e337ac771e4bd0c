//! Recursive tree builder: the mapping engine
//!
//! Walks a source value's field table, descends each field's dotted target
//! path (lazily creating nested objects), dispatches on the runtime kind of
//! the value (struct, list, scalar, missing), and applies validation and
//! coercion at the leaves. Field-level failures accumulate so one pass
//! reports every offending field; declaration mistakes abort immediately.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, FieldError, FieldErrorKind, Result};
use super::caster::cast;
use super::source::{FieldValue, MapSource, SourceField};
use super::spec::MappingSpec;
use super::tree::{Scalar, Tree};
use std::collections::BTreeMap;

/// Builds the intermediate tree for one mapping call
///
/// Owns the error accumulator for the whole walk; child struct and list
/// recursion appends to the same list, never replacing it.
pub struct TreeBuilder {
    errors: Vec<FieldError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Walk the source into a fresh root object
    ///
    /// Returns the finished tree together with every field error found
    /// anywhere in the object graph. Configuration errors abort instead.
    pub fn build(mut self, source: &dyn MapSource) -> Result<(Tree, Vec<FieldError>)> {
        let mut root = BTreeMap::new();
        self.walk(source, &mut root)?;
        Ok((Tree::Object(root), self.errors))
    }

    fn walk(&mut self, source: &dyn MapSource, dest: &mut BTreeMap<String, Tree>) -> Result<()> {
        for field in source.fields() {
            let Some(spec) = MappingSpec::parse(&field)? else {
                continue;
            };
            self.place(&spec, &field, dest)?;
        }
        Ok(())
    }

    /// Descend the target path and store the field's node at the leaf key
    fn place(
        &mut self,
        spec: &MappingSpec,
        field: &SourceField<'_>,
        dest: &mut BTreeMap<String, Tree>,
    ) -> Result<()> {
        let Some((leaf, fathers)) = spec.target_path.split_last() else {
            return Err(Error::configuration(format!(
                "empty target path for field '{}'",
                spec.display_key
            )));
        };

        let mut current = dest;
        for segment in fathers {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(Tree::empty_object);
            match entry {
                Tree::Object(child) => current = child,
                _ => {
                    return Err(Error::configuration(format!(
                        "target path segment '{}' for field '{}' collides with an existing scalar",
                        segment, spec.display_key
                    )))
                }
            }
        }

        match &field.value {
            FieldValue::Struct(nested) => {
                let mut child = BTreeMap::new();
                self.walk(*nested, &mut child)?;
                current.insert(leaf.clone(), Tree::Object(child));
            }
            FieldValue::List(items) => {
                let array = self.map_list(spec, items)?;
                current.insert(leaf.clone(), Tree::Array(array));
            }
            value => {
                if let Some(scalar) = self.map_leaf(spec, value) {
                    current.insert(leaf.clone(), Tree::Scalar(scalar));
                }
            }
        }

        Ok(())
    }

    /// Map a source sequence into an array of the same length
    ///
    /// Elements dispatch by the same rule as fields: structs become objects,
    /// nested lists recurse, scalars go through leaf handling with the
    /// field's own cast and validation. An omitted element leaves `Null` in
    /// its slot so the array mirrors the source order and length.
    fn map_list(&mut self, spec: &MappingSpec, items: &[FieldValue<'_>]) -> Result<Vec<Tree>> {
        let mut array = Vec::with_capacity(items.len());
        for item in items {
            match item {
                FieldValue::Struct(nested) => {
                    let mut child = BTreeMap::new();
                    self.walk(*nested, &mut child)?;
                    array.push(Tree::Object(child));
                }
                FieldValue::List(nested) => {
                    array.push(Tree::Array(self.map_list(spec, nested)?));
                }
                value => {
                    let node = self
                        .map_leaf(spec, value)
                        .map_or(Tree::Scalar(Scalar::Null), Tree::Scalar);
                    array.push(node);
                }
            }
        }
        Ok(array)
    }

    /// Leaf handling shared by scalar fields and scalar list elements
    ///
    /// Validation runs first, independent of the omission rule. A missing
    /// value or an empty string is omitted rather than written: blank is
    /// treated as absent, which is policy, not an error. A requested cast
    /// overwrites the stored value; its failure is a field error and
    /// nothing is written.
    fn map_leaf(&mut self, spec: &MappingSpec, value: &FieldValue<'_>) -> Option<Scalar> {
        if let Some(validator) = &spec.validator {
            if let Err(err) = validator.validate(value, &spec.display_key) {
                self.errors.push(err);
                return None;
            }
        }

        let scalar = match value {
            FieldValue::Scalar(scalar) if !value.is_missing() => scalar.clone(),
            _ => return None,
        };
        if scalar.is_empty_text() {
            return None;
        }

        match spec.cast {
            None => Some(scalar),
            Some(kind) => match cast(&scalar, kind) {
                Ok(coerced) => Some(coerced),
                Err(cause) => {
                    self.errors
                        .push(FieldError::new(FieldErrorKind::Cast, &spec.display_key, cause));
                    None
                }
            },
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
