// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::blueprint::ParameterMap;
use crate::errors::BlueprintError;

/// A declarative network: named components and the connections between them,
/// each annotated with a [`ParameterMap`].
///
/// Every connection endpoint names a declared component. Cycles are allowed.
/// Once handed to the network builder a blueprint is only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blueprint {
    components: BTreeMap<String, ParameterMap>,
    connections: BTreeMap<(String, String), ParameterMap>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        parameters: ParameterMap,
    ) -> Result<(), BlueprintError> {
        let name = name.into();
        if self.components.contains_key(&name) {
            return Err(BlueprintError::DuplicateName { name });
        }
        self.components.insert(name, parameters);
        Ok(())
    }

    /// Declare or replace a component unconditionally.
    pub fn set_component(&mut self, name: impl Into<String>, parameters: ParameterMap) {
        self.components.insert(name.into(), parameters);
    }

    /// Declare a connection. Declaring the same connection again merges the
    /// maps, the later values winning for keys present in both.
    pub fn add_connection(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        parameters: ParameterMap,
    ) -> Result<(), BlueprintError> {
        let key = self.connection_key(from.into(), to.into())?;
        self.connections
            .entry(key)
            .and_modify(|existing| existing.merge(&parameters))
            .or_insert(parameters);
        Ok(())
    }

    /// Declare or replace a connection's whole map.
    pub fn set_connection(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        parameters: ParameterMap,
    ) -> Result<(), BlueprintError> {
        let key = self.connection_key(from.into(), to.into())?;
        self.connections.insert(key, parameters);
        Ok(())
    }

    fn connection_key(&self, from: String, to: String) -> Result<(String, String), BlueprintError> {
        let missing = [&from, &to]
            .into_iter()
            .find(|endpoint| !self.components.contains_key(endpoint.as_str()))
            .cloned();
        match missing {
            Some(missing) => Err(BlueprintError::UnknownNode { from, to, missing }),
            None => Ok((from, to)),
        }
    }

    pub fn contains_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn components(&self) -> impl Iterator<Item = (&str, &ParameterMap)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn parameter_map(&self, name: &str) -> Option<&ParameterMap> {
        self.components.get(name)
    }

    pub fn connection(&self, from: &str, to: &str) -> Option<&ParameterMap> {
        self.connections.get(&(from.to_string(), to.to_string()))
    }

    /// Every connection as `(from, to, parameters)`, ordered by endpoints.
    pub fn connections(&self) -> impl Iterator<Item = (&str, &str, &ParameterMap)> {
        self.connections
            .iter()
            .map(|((from, to), params)| (from.as_str(), to.as_str(), params))
    }

    /// Components this one provides to.
    pub fn outgoing<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.connections
            .keys()
            .filter(move |(from, _)| from == name)
            .map(|(_, to)| to.as_str())
    }

    /// Components this one accepts from.
    pub fn incoming<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.connections
            .keys()
            .filter(move |(_, to)| to == name)
            .map(|(from, _)| from.as_str())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Merge another blueprint into this one.
    ///
    /// Components and connections missing here are added; shared ones merge
    /// key by key. A key both sides set to different values is a conflict and
    /// leaves `self` unchanged.
    pub fn compose_with(&mut self, other: &Blueprint) -> Result<(), BlueprintError> {
        let mut merged = self.clone();

        for (name, parameters) in &other.components {
            match merged.components.get_mut(name) {
                Some(existing) => existing.compose(&format!("component '{}'", name), parameters)?,
                None => {
                    merged.components.insert(name.clone(), parameters.clone());
                }
            }
        }

        for ((from, to), parameters) in &other.connections {
            let key = merged.connection_key(from.clone(), to.clone())?;
            match merged.connections.get_mut(&key) {
                Some(existing) => existing.compose(
                    &format!("connection '{}' -> '{}'", from, to),
                    parameters,
                )?,
                None => {
                    merged.connections.insert(key, parameters.clone());
                }
            }
        }

        *self = merged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_blueprint() -> Blueprint {
        let mut blueprint = Blueprint::new();
        blueprint
            .add_component("Source", ParameterMap::new().with("NameOfClass", ["ImageSourceComponent"]))
            .unwrap();
        blueprint
            .add_component("Sink", ParameterMap::new().with("NameOfClass", ["ImageSinkComponent"]))
            .unwrap();
        blueprint
    }

    #[test]
    fn add_component_rejects_duplicate_names() {
        let mut blueprint = two_node_blueprint();
        let err = blueprint
            .add_component("Source", ParameterMap::new())
            .unwrap_err();
        assert_eq!(
            err,
            BlueprintError::DuplicateName {
                name: "Source".to_string()
            }
        );

        blueprint.set_component("Source", ParameterMap::new().with("Dimensionality", ["3"]));
        assert_eq!(
            blueprint.parameter_map("Source").unwrap().first("Dimensionality"),
            Some("3")
        );
        assert!(!blueprint.parameter_map("Source").unwrap().contains_key("NameOfClass"));
    }

    #[test]
    fn add_connection_requires_declared_endpoints() {
        struct TestCase {
            from: &'static str,
            to: &'static str,
            missing: &'static str,
        }

        let cases = vec![
            TestCase { from: "Nowhere", to: "Sink", missing: "Nowhere" },
            TestCase { from: "Source", to: "Nowhere", missing: "Nowhere" },
            TestCase { from: "Ghost", to: "Phantom", missing: "Ghost" },
        ];

        for case in cases {
            let mut blueprint = two_node_blueprint();
            let err = blueprint
                .add_connection(case.from, case.to, ParameterMap::new())
                .unwrap_err();
            assert_eq!(
                err,
                BlueprintError::UnknownNode {
                    from: case.from.to_string(),
                    to: case.to.to_string(),
                    missing: case.missing.to_string(),
                }
            );
            assert_eq!(blueprint.connection_count(), 0);
        }
    }

    #[test]
    fn repeated_connection_merges_parameter_maps() {
        let mut blueprint = two_node_blueprint();
        blueprint
            .add_connection(
                "Source",
                "Sink",
                ParameterMap::new().with("NameOfInterface", ["ImageInterface"]),
            )
            .unwrap();
        blueprint
            .add_connection(
                "Source",
                "Sink",
                ParameterMap::new()
                    .with("NameOfInterface", ["FixedImageInterface"])
                    .with("Dimensionality", ["2"]),
            )
            .unwrap();

        let params = blueprint.connection("Source", "Sink").unwrap();
        assert_eq!(blueprint.connection_count(), 1);
        assert_eq!(params.first("NameOfInterface"), Some("FixedImageInterface"));
        assert_eq!(params.first("Dimensionality"), Some("2"));
    }

    #[test]
    fn cycles_are_permitted() {
        let mut blueprint = two_node_blueprint();
        blueprint.add_connection("Source", "Sink", ParameterMap::new()).unwrap();
        blueprint.add_connection("Sink", "Source", ParameterMap::new()).unwrap();
        blueprint.add_connection("Sink", "Sink", ParameterMap::new()).unwrap();

        assert_eq!(blueprint.outgoing("Sink").collect::<Vec<_>>(), vec!["Sink", "Source"]);
        assert_eq!(blueprint.incoming("Sink").collect::<Vec<_>>(), vec!["Sink", "Source"]);
    }

    #[test]
    fn compose_with_adds_and_merges() {
        let mut left = two_node_blueprint();
        let mut right = Blueprint::new();
        right
            .add_component("Sink", ParameterMap::new().with("Dimensionality", ["2"]))
            .unwrap();
        right.add_component("Transform", ParameterMap::new()).unwrap();
        right.add_connection("Transform", "Sink", ParameterMap::new()).unwrap();

        left.compose_with(&right).unwrap();

        assert_eq!(left.component_count(), 3);
        let sink = left.parameter_map("Sink").unwrap();
        assert_eq!(sink.first("NameOfClass"), Some("ImageSinkComponent"));
        assert_eq!(sink.first("Dimensionality"), Some("2"));
        assert!(left.connection("Transform", "Sink").is_some());
    }

    #[test]
    fn compose_with_conflict_leaves_blueprint_untouched() {
        let mut left = two_node_blueprint();
        let before = left.clone();

        let mut right = Blueprint::new();
        right.add_component("Extra", ParameterMap::new()).unwrap();
        right
            .add_component("Sink", ParameterMap::new().with("NameOfClass", ["OtherSink"]))
            .unwrap();

        let err = left.compose_with(&right).unwrap_err();
        assert!(matches!(err, BlueprintError::ConflictingParameter { ref key, .. } if key == "NameOfClass"));
        assert_eq!(left, before);
    }
}
