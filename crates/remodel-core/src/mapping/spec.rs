//! Per-field mapping descriptor and annotation parsing
//!
//! A [`MappingSpec`] is parsed fresh from a field's annotations on every
//! mapping call: the dotted target path, the optional cast kind, the parsed
//! validator, and the display key used in error messages. Declaration
//! mistakes (empty path segments, unknown cast kinds, invalid regexes) are
//! configuration errors and fail fast.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::source::SourceField;
use super::validator::Validator;

/// Marker excluding a field from mapping or validation
pub const SKIP_MARKER: &str = "-";

const CAST_PREFIX: &str = "cast=";

/// Target kind of a requested coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    Bool,
    Number,
    Float,
    String,
}

impl CastKind {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "bool" => Some(CastKind::Bool),
            "number" => Some(CastKind::Number),
            "float" => Some(CastKind::Float),
            "string" => Some(CastKind::String),
            _ => None,
        }
    }
}

/// Parsed mapping descriptor for one source field
#[derive(Debug)]
pub struct MappingSpec {
    /// Non-empty path segments; all but the last become nested object keys
    pub target_path: Vec<String>,
    pub cast: Option<CastKind>,
    pub validator: Option<Validator>,
    pub display_key: String,
}

impl MappingSpec {
    /// Parse a field's annotations; `Ok(None)` when the field is excluded
    pub fn parse(field: &SourceField<'_>) -> Result<Option<Self>> {
        let mapping = field.mapping;
        if mapping.is_empty() || mapping == SKIP_MARKER {
            return Ok(None);
        }

        let mut tokens = mapping.split(',');
        let path_token = tokens.next().unwrap_or_default();
        let target_path: Vec<String> = path_token.split('.').map(str::to_string).collect();
        if target_path.iter().any(String::is_empty) {
            return Err(Error::configuration(format!(
                "invalid target path '{}' for field '{}': empty segment",
                path_token, field.display_key
            )));
        }

        let mut cast = None;
        for token in tokens {
            if let Some(kind) = token.strip_prefix(CAST_PREFIX) {
                cast = Some(CastKind::parse(kind).ok_or_else(|| {
                    Error::configuration(format!(
                        "unknown cast kind '{}' for field '{}'",
                        kind, field.display_key
                    ))
                })?);
            }
        }

        let validator = Validator::parse(field.validation, field.display_key)?;

        Ok(Some(Self {
            target_path,
            cast,
            validator,
            display_key: field.display_key.to_string(),
        }))
    }
}
