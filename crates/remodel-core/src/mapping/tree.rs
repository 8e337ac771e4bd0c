//! Intermediate tree representation built during mapping
//!
//! The tree is the generic output of the mapping walk: nested objects for
//! dotted target paths, arrays mirroring source sequences, and scalars at
//! the leaves. It is owned by a single `apply` call and consumed by
//! materialization.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A single primitive value at a tree leaf
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Human-readable kind name, used in validator and cast messages
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Number(_) => "number",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "string",
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, Scalar::Text(text) if text.is_empty())
    }

    pub fn into_value(self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(flag) => Value::Bool(flag),
            Scalar::Number(num) => Value::Number(num.into()),
            // non-finite floats have no JSON form
            Scalar::Float(num) => Number::from_f64(num).map_or(Value::Null, Value::Number),
            Scalar::Text(text) => Value::String(text),
        }
    }
}

/// The generic tree materialized as the mapping output
///
/// Object keys are unique and key order is irrelevant to materialization.
/// Array order and length mirror the source sequence; omitted elements hold
/// `Scalar(Null)` in their slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Scalar(Scalar),
    Object(BTreeMap<String, Tree>),
    Array(Vec<Tree>),
}

impl Tree {
    pub fn empty_object() -> Self {
        Tree::Object(BTreeMap::new())
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Tree>> {
        match self {
            Tree::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Tree]> {
        match self {
            Tree::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Encode the tree as a `serde_json::Value` for materialization
    pub fn into_value(self) -> Value {
        match self {
            Tree::Scalar(scalar) => scalar.into_value(),
            Tree::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, node)| (key, node.into_value()))
                    .collect(),
            ),
            Tree::Array(items) => {
                Value::Array(items.into_iter().map(Tree::into_value).collect())
            }
        }
    }
}
