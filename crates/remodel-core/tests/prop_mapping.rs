//! Property-based tests for the mapping engine
//!
//! These tests verify invariants that should hold for all valid inputs:
//! cast round trips, array shape fidelity, and the aggregate-all error
//! policy.

use proptest::prelude::*;
use remodel_core::{apply, cast, to_tree, CastKind, FieldValue, MapSource, Scalar, SourceField};
use serde_json::Value;

struct Numbers {
    values: Vec<i64>,
}

impl MapSource for Numbers {
    fn fields(&self) -> Vec<SourceField<'_>> {
        vec![SourceField::new(
            "values",
            "values,cast=string",
            "",
            FieldValue::list(self.values.iter().copied()),
        )]
    }
}

struct Labeled {
    label: String,
}

impl MapSource for Labeled {
    fn fields(&self) -> Vec<SourceField<'_>> {
        vec![SourceField::new("label", "label", "required,string,min=1", &self.label)]
    }
}

proptest! {
    /// number -> string -> number returns the original integer
    #[test]
    fn prop_number_string_round_trip(original in any::<i64>()) {
        let as_text = cast(&Scalar::Number(original), CastKind::String)
            .expect("number to string never fails");
        let back = cast(&as_text, CastKind::Number)
            .expect("round trip parses back");
        prop_assert_eq!(back, Scalar::Number(original));
    }

    /// bool -> string -> bool returns the original flag
    #[test]
    fn prop_bool_string_round_trip(original in any::<bool>()) {
        let as_text = cast(&Scalar::Bool(original), CastKind::String)
            .expect("bool to string never fails");
        let back = cast(&as_text, CastKind::Bool)
            .expect("round trip parses back");
        prop_assert_eq!(back, Scalar::Bool(original));
    }

    /// number -> bool matches the non-zero rule for every integer
    #[test]
    fn prop_number_to_bool_non_zero(num in any::<i64>()) {
        let coerced = cast(&Scalar::Number(num), CastKind::Bool)
            .expect("number to bool never fails");
        prop_assert_eq!(coerced, Scalar::Bool(num != 0));
    }

    /// a mapped sequence always produces an array of the source length
    #[test]
    fn prop_array_length_is_preserved(values in proptest::collection::vec(any::<i64>(), 0..32)) {
        let expected = values.len();
        let tree = to_tree(&Numbers { values }).expect("mapping succeeds");
        let root = tree.as_object().expect("root object");
        let array = root["values"].as_array().expect("array node");
        prop_assert_eq!(array.len(), expected);
    }

    /// a required non-empty string always maps cleanly to the target
    #[test]
    fn prop_non_empty_labels_map(label in "[a-zA-Z0-9 ]{1,40}") {
        let doc: Value = apply(&Labeled { label: label.clone() }).expect("mapping succeeds");
        prop_assert_eq!(doc["label"].as_str(), Some(label.as_str()));
    }

    /// unparseable text always surfaces as a wrapped cast error
    #[test]
    fn prop_bad_number_text_is_reported(text in "[a-zA-Z]{1,12}") {
        struct Casting<'a> {
            raw: &'a str,
        }

        impl MapSource for Casting<'_> {
            fn fields(&self) -> Vec<SourceField<'_>> {
                vec![SourceField::new("raw", "raw,cast=number", "", self.raw)]
            }
        }

        let err = apply::<_, Value>(&Casting { raw: &text }).expect_err("cast fails");
        let message = err.to_string();
        prop_assert!(message.contains("[field: raw ]"));
        prop_assert!(message.contains("cannot cast"));
    }
}
