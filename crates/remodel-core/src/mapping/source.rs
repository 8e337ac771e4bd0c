//! Source-side field table: the declarative replacement for reflection
//!
//! A source type opts into mapping by implementing [`MapSource`], returning
//! one [`SourceField`] per field with its annotations and runtime value.
//! The engine only ever sees this uniform table, so no runtime introspection
//! is needed anywhere.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use super::tree::Scalar;
use std::fmt;

/// A source value whose fields carry mapping metadata
///
/// Implementations list every field that participates in mapping. Fields
/// without an entry (or with a skip-marker annotation) are excluded from the
/// output tree and from validation.
pub trait MapSource {
    fn fields(&self) -> Vec<SourceField<'_>>;
}

/// One source field: its annotations plus its runtime value
pub struct SourceField<'a> {
    /// Human-readable identifier used only in error messages
    pub display_key: &'a str,
    /// Mapping annotation: `<dotted-target-path>[,cast=<kind>]`; empty or
    /// `"-"` excludes the field entirely
    pub mapping: &'a str,
    /// Validation annotation: comma-separated tokens; empty or `"-"` means
    /// no validation
    pub validation: &'a str,
    pub value: FieldValue<'a>,
}

impl<'a> SourceField<'a> {
    pub fn new(
        display_key: &'a str,
        mapping: &'a str,
        validation: &'a str,
        value: impl Into<FieldValue<'a>>,
    ) -> Self {
        Self {
            display_key,
            mapping,
            validation,
            value: value.into(),
        }
    }
}

/// Runtime value of a source field
///
/// `Missing` is a first-class state for absent optionals, distinct from a
/// present-but-zero value; validators receive that distinction explicitly.
pub enum FieldValue<'a> {
    Missing,
    Scalar(Scalar),
    Struct(&'a dyn MapSource),
    List(Vec<FieldValue<'a>>),
}

impl<'a> FieldValue<'a> {
    /// A nested struct-shaped value, walked through its own field table
    pub fn nested(source: &'a dyn MapSource) -> Self {
        FieldValue::Struct(source)
    }

    /// A sequence value; elements may be scalars, structs, or nested lists
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue<'a>>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// `Missing` on `None`, the converted inner value otherwise
    pub fn opt<V>(value: Option<V>) -> Self
    where
        V: Into<FieldValue<'a>>,
    {
        value.map_or(FieldValue::Missing, Into::into)
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Missing, Into::into)
    }

    /// Whether the field carries no usable value (absent optional or null)
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing | FieldValue::Scalar(Scalar::Null))
    }

    /// Human-readable kind name, used in validator messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Missing => "missing",
            FieldValue::Scalar(scalar) => scalar.kind(),
            FieldValue::Struct(_) => "struct",
            FieldValue::List(_) => "list",
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => write!(f, "Missing"),
            FieldValue::Scalar(scalar) => write!(f, "Scalar({:?})", scalar),
            FieldValue::Struct(_) => write!(f, "Struct(..)"),
            FieldValue::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        FieldValue::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Scalar(Scalar::Number(value))
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Scalar(Scalar::Number(value.into()))
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for FieldValue<'_> {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<&String> for FieldValue<'_> {
    fn from(value: &String) -> Self {
        FieldValue::Scalar(Scalar::Text(value.clone()))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(value: String) -> Self {
        FieldValue::Scalar(Scalar::Text(value))
    }
}

impl From<Scalar> for FieldValue<'_> {
    fn from(value: Scalar) -> Self {
        FieldValue::Scalar(value)
    }
}
