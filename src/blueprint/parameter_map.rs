// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::BlueprintError;

/// Criteria and settings of one component or connection: each key maps to an
/// ordered list of string values.
///
/// Ordered by key so exports and comparisons are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap(BTreeMap<String, Vec<String>>);

impl ParameterMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder form of [`ParameterMap::insert`].
    pub fn with<K, I, V>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(key, values);
        self
    }

    /// Set a key's values, replacing any it already had.
    pub fn insert<K, I, V>(&mut self, key: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.0
            .insert(key.into(), values.into_iter().map(Into::into).collect());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// The first value of a key, for single-valued parameters.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key union; for a key present on both sides the incoming values win.
    pub fn merge(&mut self, incoming: &ParameterMap) {
        for (key, values) in incoming.iter() {
            self.0.insert(key.clone(), values.clone());
        }
    }

    /// Key union that refuses to silently override: a key present on both
    /// sides must carry identical values.
    pub fn compose(&mut self, owner: &str, incoming: &ParameterMap) -> Result<(), BlueprintError> {
        for (key, values) in incoming.iter() {
            match self.0.get(key) {
                Some(existing) if existing != values => {
                    return Err(BlueprintError::ConflictingParameter {
                        owner: owner.to_string(),
                        key: key.clone(),
                        left: existing.clone(),
                        right: values.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    self.0.insert(key.clone(), values.clone());
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for ParameterMap {
    fn from_iter<T: IntoIterator<Item = (K, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<BTreeMap<String, Vec<String>>> for ParameterMap {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_values_of_shared_keys() {
        let mut left = ParameterMap::new()
            .with("NameOfClass", ["ImageSourceComponent"])
            .with("Dimensionality", ["2"]);
        let right = ParameterMap::new()
            .with("Dimensionality", ["3"])
            .with("PixelType", ["float"]);

        left.merge(&right);

        assert_eq!(left.len(), 3);
        assert_eq!(left.first("Dimensionality"), Some("3"));
        assert_eq!(left.first("NameOfClass"), Some("ImageSourceComponent"));
    }

    #[test]
    fn compose_accepts_equal_values_and_rejects_conflicts() {
        let mut left = ParameterMap::new().with("ExecutionOrder", ["Rigid", "Affine"]);

        let same = ParameterMap::new().with("ExecutionOrder", ["Rigid", "Affine"]);
        assert!(left.compose("Transform", &same).is_ok());

        let reordered = ParameterMap::new().with("ExecutionOrder", ["Affine", "Rigid"]);
        let err = left.compose("Transform", &reordered).unwrap_err();
        assert_eq!(
            err,
            BlueprintError::ConflictingParameter {
                owner: "Transform".to_string(),
                key: "ExecutionOrder".to_string(),
                left: vec!["Rigid".to_string(), "Affine".to_string()],
                right: vec!["Affine".to_string(), "Rigid".to_string()],
            }
        );
    }

    #[test]
    fn multi_valued_parameters_keep_their_order() {
        let map = ParameterMap::new().with("TransformParameters", ["0.5", "-1", "2"]);
        assert_eq!(
            map.get("TransformParameters"),
            Some(&["0.5".to_string(), "-1".to_string(), "2".to_string()][..])
        );
        assert_eq!(map.get("Missing"), None);
    }
}
