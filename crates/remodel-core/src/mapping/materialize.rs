//! Materialization of a finished tree into the target shape
//!
//! The tree is encoded to a generic `serde_json::Value` and decoded into the
//! target type through its own field-name-driven serde rules, so tree keys
//! must match the target's expected identifiers. A decode failure signals a
//! structural mismatch between tree and target; it is fatal and never
//! aggregated with field errors.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use super::tree::Tree;
use serde::de::DeserializeOwned;

/// Decode a finished tree into the caller's target type
pub fn materialize<T>(tree: Tree) -> Result<T>
where
    T: DeserializeOwned,
{
    let encoded = tree.into_value();
    let target = serde_json::from_value(encoded).map_err(|err| {
        log::warn!("materialization failed: {}", err);
        err
    })?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::mapping::tree::Scalar;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Target {
        name: String,
        #[serde(default)]
        port: Option<i64>,
    }

    fn sample_tree(port: Option<i64>) -> Tree {
        let mut root = BTreeMap::new();
        root.insert(
            "name".to_string(),
            Tree::Scalar(Scalar::Text("api".to_string())),
        );
        if let Some(port) = port {
            root.insert("port".to_string(), Tree::Scalar(Scalar::Number(port)));
        }
        Tree::Object(root)
    }

    #[test]
    fn test_materialize_into_struct() {
        let target: Target = materialize(sample_tree(Some(8080))).unwrap();
        assert_eq!(
            target,
            Target {
                name: "api".to_string(),
                port: Some(8080),
            }
        );
    }

    #[test]
    fn test_omitted_key_becomes_default() {
        let target: Target = materialize(sample_tree(None)).unwrap();
        assert_eq!(target.port, None);
    }

    #[test]
    fn test_shape_mismatch_is_materialization_error() {
        let result: Result<i64> = materialize(sample_tree(None));
        assert!(matches!(result, Err(Error::Materialization { .. })));
    }
}
