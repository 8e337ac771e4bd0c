//! Validator enum, annotation parsing, and validate dispatch
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, FieldError, FieldErrorKind, Result};
use crate::mapping::source::FieldValue;
use crate::mapping::spec::SKIP_MARKER;
use crate::mapping::tree::Scalar;
use regex::Regex;

const REQUIRED_TOKEN: &str = "required";
const REGEX_PREFIX: &str = "regex=";

/// Fixed email-shaped pattern: word/`+`/`-`/`.` local part, lowercase
/// letter/digit/hyphen labels, at least one dot, final all-letters label
const EMAIL_PATTERN: &str = r"^[\w+\-.]+@[a-z\d-]+(\.[a-z]+)*\.[a-z]+$";

/// Field validator, a closed set dispatched by variant
///
/// Created fresh per validation call from the parsed annotation; stateless
/// beyond its own constraints, never shared or mutated after creation.
#[derive(Debug)]
pub enum Validator {
    /// Passes unless `required` and the value is missing
    Default { required: bool },
    /// String presence and length bounds
    String {
        required: bool,
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Integer value bounds
    Number {
        required: bool,
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Email-shaped string
    Email { required: bool, pattern: Regex },
    /// Caller-supplied regular expression match
    Pattern { required: bool, pattern: Regex },
    /// Boolean or numeric boolean-coercible value
    Boolean { required: bool },
}

impl Validator {
    /// Parse a validation annotation; `Ok(None)` when empty or skipped
    ///
    /// `required` may appear anywhere in the token list; the first remaining
    /// token selects the variant; the rest are `key=value` constraints. An
    /// invalid regular expression or malformed constraint is a configuration
    /// error, raised here rather than per record.
    pub fn parse(annotation: &str, display_key: &str) -> Result<Option<Self>> {
        if annotation.is_empty() || annotation == SKIP_MARKER {
            return Ok(None);
        }

        let mut tokens: Vec<&str> = annotation.split(',').collect();
        let required = tokens.iter().any(|token| *token == REQUIRED_TOKEN);
        tokens.retain(|token| *token != REQUIRED_TOKEN);

        let validator = match tokens.first().copied() {
            Some("number") => {
                let (min, max) = parse_bounds(&tokens[1..], display_key)?;
                Validator::Number { required, min, max }
            }
            Some("string") => {
                let (min, max) = parse_bounds(&tokens[1..], display_key)?;
                Validator::String { required, min, max }
            }
            Some("email") => Validator::Email {
                required,
                pattern: compile(EMAIL_PATTERN, display_key)?,
            },
            Some("pattern") => {
                let remainder = tokens[1..].join(",");
                let expr = remainder.strip_prefix(REGEX_PREFIX).ok_or_else(|| {
                    Error::configuration(format!(
                        "pattern validator for field '{}' requires a regex= constraint",
                        display_key
                    ))
                })?;
                Validator::Pattern {
                    required,
                    pattern: compile(expr, display_key)?,
                }
            }
            Some("bool") => Validator::Boolean { required },
            _ => Validator::Default { required },
        };

        Ok(Some(validator))
    }

    pub fn is_required(&self) -> bool {
        match self {
            Validator::Default { required }
            | Validator::String { required, .. }
            | Validator::Number { required, .. }
            | Validator::Email { required, .. }
            | Validator::Pattern { required, .. }
            | Validator::Boolean { required } => *required,
        }
    }

    /// Validate a field value, producing the field error on failure
    ///
    /// Required-but-missing always wins over every other constraint check.
    /// A missing value passes every non-required validator.
    pub fn validate(
        &self,
        value: &FieldValue<'_>,
        display_key: &str,
    ) -> std::result::Result<(), FieldError> {
        if value.is_missing() {
            if self.is_required() {
                return Err(required_error(display_key));
            }
            return Ok(());
        }

        match self {
            Validator::Default { .. } => Ok(()),

            Validator::String { required, min, max } => {
                let FieldValue::Scalar(Scalar::Text(text)) = value else {
                    return Err(type_error(display_key, "a string", value));
                };
                let len = text.len() as i64;
                if *required && len == 0 {
                    return Err(required_error(display_key));
                }
                if let Some(min) = min {
                    if len < *min {
                        return Err(FieldError::new(
                            FieldErrorKind::Range,
                            display_key,
                            format!("{} should be at least {} chars long", display_key, min),
                        ));
                    }
                }
                // a max below min disables the upper bound
                if let Some(max) = max {
                    if *max >= min.unwrap_or(0) && len > *max {
                        return Err(FieldError::new(
                            FieldErrorKind::Range,
                            display_key,
                            format!("{} should be less than {} chars long", display_key, max),
                        ));
                    }
                }
                Ok(())
            }

            Validator::Number { min, max, .. } => {
                let FieldValue::Scalar(Scalar::Number(num)) = value else {
                    return Err(type_error(display_key, "a number", value));
                };
                if let Some(min) = min {
                    if num < min {
                        return Err(FieldError::new(
                            FieldErrorKind::Range,
                            display_key,
                            format!("{} should be greater than {}", display_key, min),
                        ));
                    }
                }
                if let Some(max) = max {
                    if *max >= min.unwrap_or(i64::MIN) && num > max {
                        return Err(FieldError::new(
                            FieldErrorKind::Range,
                            display_key,
                            format!("{} should be less than {}", display_key, max),
                        ));
                    }
                }
                Ok(())
            }

            Validator::Email { required, pattern } => {
                let FieldValue::Scalar(Scalar::Text(text)) = value else {
                    return Err(type_error(display_key, "a string", value));
                };
                if *required && text.is_empty() {
                    return Err(required_error(display_key));
                }
                if !pattern.is_match(text) {
                    return Err(FieldError::new(
                        FieldErrorKind::Format,
                        display_key,
                        format!("[{}] is not a valid email address", display_key),
                    ));
                }
                Ok(())
            }

            Validator::Pattern { required, pattern } => {
                let FieldValue::Scalar(Scalar::Text(text)) = value else {
                    return Err(type_error(display_key, "a string", value));
                };
                if *required && text.is_empty() {
                    return Err(required_error(display_key));
                }
                if !pattern.is_match(text) {
                    return Err(FieldError::new(
                        FieldErrorKind::Format,
                        display_key,
                        format!("[{}] does not match the required format", display_key),
                    ));
                }
                Ok(())
            }

            Validator::Boolean { .. } => match value {
                FieldValue::Scalar(Scalar::Bool(_)) | FieldValue::Scalar(Scalar::Number(_)) => {
                    Ok(())
                }
                _ => Err(FieldError::new(
                    FieldErrorKind::Type,
                    display_key,
                    format!("{} must be a boolean-compatible value", display_key),
                )),
            },
        }
    }
}

fn parse_bounds(tokens: &[&str], display_key: &str) -> Result<(Option<i64>, Option<i64>)> {
    let mut min = None;
    let mut max = None;
    for token in tokens {
        if let Some(raw) = token.strip_prefix("min=") {
            min = Some(parse_bound(raw, token, display_key)?);
        } else if let Some(raw) = token.strip_prefix("max=") {
            max = Some(parse_bound(raw, token, display_key)?);
        }
    }
    Ok((min, max))
}

fn parse_bound(raw: &str, token: &str, display_key: &str) -> Result<i64> {
    raw.parse().map_err(|err: std::num::ParseIntError| Error::Configuration {
        message: format!("invalid constraint '{}' for field '{}'", token, display_key),
        source: Some(err.into()),
    })
}

fn compile(pattern: &str, display_key: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| Error::Configuration {
        message: format!("invalid regular expression for field '{}'", display_key),
        source: Some(err.into()),
    })
}

fn required_error(display_key: &str) -> FieldError {
    FieldError::new(
        FieldErrorKind::Required,
        display_key,
        format!("[{}] field is required", display_key),
    )
}

fn type_error(display_key: &str, expected: &str, value: &FieldValue<'_>) -> FieldError {
    FieldError::new(
        FieldErrorKind::Type,
        display_key,
        format!("{} must be {}, got {}", display_key, expected, value.kind()),
    )
}
