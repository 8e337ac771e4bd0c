//! Closed cast strategy set for coercion between primitive kinds
//!
//! Pure conversion between the four scalar kinds (bool, number, float,
//! string). Same-kind casts are no-ops; any (source, target) pair outside
//! the table passes the value through unchanged with no error.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use super::spec::CastKind;
use super::tree::Scalar;

/// Coerce a scalar to the requested kind
///
/// Returns the cause message on failure; the caller wraps it into a field
/// error with the display key.
pub fn cast(value: &Scalar, to: CastKind) -> Result<Scalar, String> {
    match (value, to) {
        (Scalar::Bool(flag), CastKind::Number) => Ok(Scalar::Number(i64::from(*flag))),
        (Scalar::Bool(flag), CastKind::Float) => {
            Ok(Scalar::Float(if *flag { 1.0 } else { 0.0 }))
        }
        (Scalar::Bool(flag), CastKind::String) => Ok(Scalar::Text(flag.to_string())),

        (Scalar::Number(num), CastKind::Bool) => Ok(Scalar::Bool(*num != 0)),
        (Scalar::Number(num), CastKind::String) => Ok(Scalar::Text(num.to_string())),
        // pass-through: the scalar already holds the numeric value
        (Scalar::Number(num), CastKind::Float) => Ok(Scalar::Number(*num)),

        (Scalar::Float(num), CastKind::Bool) => Ok(Scalar::Bool(*num != 0.0)),
        (Scalar::Float(num), CastKind::String) => Ok(Scalar::Text(num.to_string())),

        (Scalar::Text(text), CastKind::Bool) => parse_bool(text)
            .map(Scalar::Bool)
            .ok_or_else(|| format!("cannot cast \"{}\" to bool", text)),
        (Scalar::Text(text), CastKind::Number) => text
            .parse::<i64>()
            .map(Scalar::Number)
            .map_err(|_| format!("cannot cast \"{}\" to number", text)),
        (Scalar::Text(text), CastKind::Float) => text
            .parse::<f64>()
            .map(Scalar::Float)
            .map_err(|_| format!("cannot cast \"{}\" to float", text)),

        // same-kind casts and un-tabled conversions pass through unchanged
        _ => Ok(value.clone()),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_casts() {
        assert_eq!(cast(&Scalar::Bool(true), CastKind::Number), Ok(Scalar::Number(1)));
        assert_eq!(cast(&Scalar::Bool(false), CastKind::Number), Ok(Scalar::Number(0)));
        assert_eq!(cast(&Scalar::Bool(true), CastKind::Float), Ok(Scalar::Float(1.0)));
        assert_eq!(
            cast(&Scalar::Bool(false), CastKind::String),
            Ok(Scalar::Text("false".to_string()))
        );
    }

    #[test]
    fn test_number_casts() {
        assert_eq!(cast(&Scalar::Number(3), CastKind::Bool), Ok(Scalar::Bool(true)));
        assert_eq!(cast(&Scalar::Number(0), CastKind::Bool), Ok(Scalar::Bool(false)));
        assert_eq!(
            cast(&Scalar::Number(-42), CastKind::String),
            Ok(Scalar::Text("-42".to_string()))
        );
        // number->float keeps the numeric value as-is
        assert_eq!(cast(&Scalar::Number(7), CastKind::Float), Ok(Scalar::Number(7)));
    }

    #[test]
    fn test_float_casts() {
        assert_eq!(cast(&Scalar::Float(0.5), CastKind::Bool), Ok(Scalar::Bool(true)));
        assert_eq!(cast(&Scalar::Float(0.0), CastKind::Bool), Ok(Scalar::Bool(false)));
        assert_eq!(
            cast(&Scalar::Float(1.5), CastKind::String),
            Ok(Scalar::Text("1.5".to_string()))
        );
        // shortest round-trippable text, no fixed precision
        assert_eq!(
            cast(&Scalar::Float(2.0), CastKind::String),
            Ok(Scalar::Text("2".to_string()))
        );
    }

    #[test]
    fn test_string_casts() {
        assert_eq!(
            cast(&Scalar::Text("TRUE".to_string()), CastKind::Bool),
            Ok(Scalar::Bool(true))
        );
        assert_eq!(
            cast(&Scalar::Text("0".to_string()), CastKind::Bool),
            Ok(Scalar::Bool(false))
        );
        assert_eq!(
            cast(&Scalar::Text("123".to_string()), CastKind::Number),
            Ok(Scalar::Number(123))
        );
        assert_eq!(
            cast(&Scalar::Text("1.25".to_string()), CastKind::Float),
            Ok(Scalar::Float(1.25))
        );
    }

    #[test]
    fn test_string_parse_failures() {
        assert!(cast(&Scalar::Text("yes".to_string()), CastKind::Bool).is_err());
        assert!(cast(&Scalar::Text("12.5".to_string()), CastKind::Number).is_err());
        assert!(cast(&Scalar::Text("abc".to_string()), CastKind::Float).is_err());
    }

    #[test]
    fn test_same_kind_is_noop() {
        assert_eq!(
            cast(&Scalar::Text("x".to_string()), CastKind::String),
            Ok(Scalar::Text("x".to_string()))
        );
        assert_eq!(cast(&Scalar::Number(5), CastKind::Number), Ok(Scalar::Number(5)));
        assert_eq!(cast(&Scalar::Bool(true), CastKind::Bool), Ok(Scalar::Bool(true)));
    }

    #[test]
    fn test_untabled_conversions_pass_through() {
        // float->number is not in the table
        assert_eq!(cast(&Scalar::Float(1.5), CastKind::Number), Ok(Scalar::Float(1.5)));
        assert_eq!(cast(&Scalar::Null, CastKind::String), Ok(Scalar::Null));
    }

    #[test]
    fn test_number_string_round_trip() {
        for original in [0i64, 1, -1, 9_007_199_254_740_993] {
            let as_text = cast(&Scalar::Number(original), CastKind::String)
                .expect("number to string cast");
            let back = cast(&as_text, CastKind::Number).expect("string to number cast");
            assert_eq!(back, Scalar::Number(original));
        }
    }
}
