// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Connection resolution over the candidate sets of a blueprint.
//!
//! Every component starts with the catalog entries its own parameter map
//! admits. Every connection then lists the capability triples some pair of
//! endpoint candidates can satisfy. Pruning alternates between dropping
//! candidates that lost support on one of their connections and dropping
//! triples whose provider or acceptor was dropped, until neither changes.
//!
//! Nodes, edges and descriptors are plain indices into arenas, so the fixed
//! point is a worklist loop rather than a walk over linked structures.

use std::collections::{BTreeSet, VecDeque};
use std::fmt::{self, Display, Formatter};

use crate::blueprint::{Blueprint, ParameterMap};
use crate::catalog::{ComponentCatalog, ComponentSelector, DescriptorId};
use crate::config::consts::{
    DIMENSIONALITY, INTERNAL_COMPUTATION_VALUE_TYPE, NAME_OF_INTERFACE, PIXEL_TYPE,
};
use crate::errors::ResolutionError;
use crate::observability::messages::resolution::{
    CandidatesPruned, CandidatesSelected, NoMatchingComponentFound,
};
use crate::observability::messages::StructuredLog;
use crate::observability::Logger;
use crate::traits::CapabilitySignature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "edge#{}", self.0)
    }
}

/// One way a connection can be realized: `provider` hands `capability` to
/// `acceptor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple {
    pub provider: DescriptorId,
    pub acceptor: DescriptorId,
    pub capability: CapabilitySignature,
}

/// Restrictions a connection's parameter map places on the capabilities it
/// may carry.
#[derive(Debug, Default)]
struct EdgeFilter {
    interface: Option<String>,
    dimensionality: Option<usize>,
    value_types: Vec<String>,
}

impl EdgeFilter {
    /// Unrecognized keys and malformed values make the edge unsatisfiable.
    fn parse(parameters: &ParameterMap) -> Result<Self, String> {
        let mut filter = Self::default();
        for (key, values) in parameters {
            let value = match values.as_slice() {
                [value] => value.trim(),
                _ => {
                    return Err(format!(
                        "'{}' needs exactly one value, got {}",
                        key,
                        values.len()
                    ))
                }
            };
            match key.as_str() {
                NAME_OF_INTERFACE => filter.interface = Some(value.to_string()),
                DIMENSIONALITY => {
                    let dimensionality = value.parse::<usize>().map_err(|_| {
                        format!("'{}' is not a valid {}", value, DIMENSIONALITY)
                    })?;
                    filter.dimensionality = Some(dimensionality);
                }
                PIXEL_TYPE | INTERNAL_COMPUTATION_VALUE_TYPE => {
                    filter.value_types.push(value.to_string())
                }
                other => return Err(format!("connection criterion '{}' is not recognized", other)),
            }
        }
        Ok(filter)
    }

    fn admits(&self, capability: &CapabilitySignature) -> bool {
        self.interface
            .as_deref()
            .map_or(true, |name| capability.name == name)
            && self
                .dimensionality
                .map_or(true, |d| capability.dimensionality == d)
            && self
                .value_types
                .iter()
                .all(|name| capability.value_type.name() == name)
    }
}

struct NodeSlot {
    name: String,
    candidates: Vec<DescriptorId>,
    pruned_by: BTreeSet<EdgeId>,
}

struct EdgeSlot {
    from: NodeId,
    to: NodeId,
    triples: Vec<Triple>,
}

impl EdgeSlot {
    fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// Whether `candidate` of `node` still takes part in some triple, on
    /// every side of this edge `node` is on.
    fn supports(&self, node: NodeId, candidate: DescriptorId) -> bool {
        let as_provider =
            self.from != node || self.triples.iter().any(|t| t.provider == candidate);
        let as_acceptor =
            self.to != node || self.triples.iter().any(|t| t.acceptor == candidate);
        as_provider && as_acceptor
    }
}

/// Candidate sets and connection triples for one blueprint.
pub struct Resolution<'a> {
    catalog: &'a ComponentCatalog,
    logger: Logger,
    nodes: Vec<NodeSlot>,
    edges: Vec<EdgeSlot>,
}

impl<'a> Resolution<'a> {
    pub fn new(catalog: &'a ComponentCatalog, blueprint: &Blueprint) -> Result<Self, ResolutionError> {
        Self::with_logger(catalog, blueprint, Logger::root())
    }

    /// Select candidates for every component and triples for every
    /// connection. A component nothing in the catalog matches, or a
    /// connection no candidate pair can carry, fails right away.
    pub fn with_logger(
        catalog: &'a ComponentCatalog,
        blueprint: &Blueprint,
        logger: Logger,
    ) -> Result<Self, ResolutionError> {
        let selector = ComponentSelector::new(catalog);
        let mut nodes = Vec::with_capacity(blueprint.component_count());

        for (name, parameters) in blueprint.components() {
            let selection = selector.select(parameters);
            if selection.candidates.is_empty() {
                let reason = selection.summary();
                logger.in_scope(|| NoMatchingComponentFound { node: name, reason: &reason }.log());
                return Err(ResolutionError::NoMatchingComponent {
                    node: name.to_string(),
                    reason,
                });
            }

            let tags = selection
                .candidates
                .iter()
                .map(|id| catalog[*id].type_tag())
                .collect::<Vec<_>>();
            logger.in_scope(|| {
                CandidatesSelected {
                    node: name,
                    candidates: &tags,
                    rejected: selection.rejections.len(),
                }
                .log()
            });

            nodes.push(NodeSlot {
                name: name.to_string(),
                candidates: selection.candidates,
                pruned_by: BTreeSet::new(),
            });
        }

        let mut resolution = Self {
            catalog,
            logger,
            nodes,
            edges: Vec::with_capacity(blueprint.connection_count()),
        };

        for (from, to, parameters) in blueprint.connections() {
            let edge = resolution.initial_edge(from, to, parameters)?;
            resolution.edges.push(edge);
        }

        Ok(resolution)
    }

    fn initial_edge(
        &self,
        from: &str,
        to: &str,
        parameters: &ParameterMap,
    ) -> Result<EdgeSlot, ResolutionError> {
        let unsatisfiable = |reason: String| ResolutionError::UnsatisfiableConnection {
            from: from.to_string(),
            to: to.to_string(),
            interface: parameters.first(NAME_OF_INTERFACE).map(str::to_string),
            reason,
        };

        let filter = EdgeFilter::parse(parameters).map_err(unsatisfiable)?;
        let (from_id, to_id) = match (self.node_id(from), self.node_id(to)) {
            (Some(from_id), Some(to_id)) => (from_id, to_id),
            _ => return Err(unsatisfiable("an endpoint is not a declared component".to_string())),
        };

        let mut triples = Vec::new();
        for &provider in &self.nodes[from_id.0].candidates {
            for &acceptor in &self.nodes[to_id.0].candidates {
                // Both ends of a self-loop are the same instance.
                if from_id == to_id && provider != acceptor {
                    continue;
                }
                let accepted = self.catalog[acceptor].accepted();
                triples.extend(
                    self.catalog[provider]
                        .provided()
                        .iter()
                        .filter(|capability| accepted.contains(capability))
                        .filter(|capability| filter.admits(capability))
                        .map(|capability| Triple {
                            provider,
                            acceptor,
                            capability: *capability,
                        }),
                );
            }
        }

        if triples.is_empty() {
            let reason = match &filter.interface {
                Some(name) => format!(
                    "no candidate of '{}' provides '{}' to a candidate of '{}'",
                    from, name, to
                ),
                None => format!(
                    "no capability provided by a candidate of '{}' is accepted by a candidate of '{}'",
                    from, to
                ),
            };
            return Err(unsatisfiable(reason));
        }

        Ok(EdgeSlot {
            from: from_id,
            to: to_id,
            triples,
        })
    }

    /// Narrow candidates and triples to their fixed point. Returns whether
    /// anything was removed; a second call on the result returns `false`.
    pub fn prune(&mut self) -> Result<bool, ResolutionError> {
        let mut changed = false;
        let mut queued = vec![true; self.nodes.len()];
        let mut worklist = (0..self.nodes.len()).map(NodeId).collect::<VecDeque<_>>();

        while let Some(node) = worklist.pop_front() {
            queued[node.0] = false;

            let mut removed = Vec::new();
            for edge_index in 0..self.edges.len() {
                let edge = &self.edges[edge_index];
                if !edge.touches(node) {
                    continue;
                }
                let before = self.nodes[node.0].candidates.len();
                self.nodes[node.0]
                    .candidates
                    .retain(|candidate| edge.supports(node, *candidate));
                let after = self.nodes[node.0].candidates.len();
                if after < before {
                    let slot = &mut self.nodes[node.0];
                    slot.pruned_by.insert(EdgeId(edge_index));
                    removed.push(EdgeId(edge_index));

                    let (from, to) = (self.node_name(edge.from), self.node_name(edge.to));
                    self.logger.in_scope(|| {
                        CandidatesPruned {
                            node: &self.nodes[node.0].name,
                            from,
                            to,
                            removed: before - after,
                            remaining: after,
                        }
                        .log()
                    });
                }
            }

            if removed.is_empty() {
                continue;
            }
            changed = true;

            if self.nodes[node.0].candidates.is_empty() {
                let slot = &self.nodes[node.0];
                let reason = format!(
                    "every candidate was ruled out by its connections: {}",
                    slot.pruned_by
                        .iter()
                        .map(|edge| {
                            let (from, to) = self.endpoints(*edge);
                            format!("'{}' -> '{}'", self.node_name(from), self.node_name(to))
                        })
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                self.logger.in_scope(|| {
                    NoMatchingComponentFound {
                        node: &slot.name,
                        reason: &reason,
                    }
                    .log()
                });
                return Err(ResolutionError::NoMatchingComponent {
                    node: slot.name.clone(),
                    reason,
                });
            }

            for edge in self.edges.iter_mut().filter(|edge| edge.touches(node)) {
                let (from, to) = (edge.from, edge.to);
                let (provider_ids, acceptor_ids) = (
                    &self.nodes[from.0].candidates,
                    &self.nodes[to.0].candidates,
                );
                let before = edge.triples.len();
                edge.triples.retain(|t| {
                    provider_ids.contains(&t.provider) && acceptor_ids.contains(&t.acceptor)
                });
                if edge.triples.len() == before {
                    continue;
                }
                for neighbour in [from, to] {
                    if !queued[neighbour.0] {
                        queued[neighbour.0] = true;
                        worklist.push_back(neighbour);
                    }
                }
            }
        }

        Ok(changed)
    }

    pub fn catalog(&self) -> &'a ComponentCatalog {
        self.catalog
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len()).map(EdgeId)
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn node_name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    pub fn candidates(&self, node: NodeId) -> &[DescriptorId] {
        &self.nodes[node.0].candidates
    }

    /// Type tags of a node's remaining candidates.
    pub fn candidate_tags(&self, node: NodeId) -> Vec<String> {
        self.candidates(node)
            .iter()
            .map(|id| self.catalog[*id].type_tag())
            .collect()
    }

    /// `(provider, acceptor)` of an edge.
    pub fn endpoints(&self, edge: EdgeId) -> (NodeId, NodeId) {
        let slot = &self.edges[edge.0];
        (slot.from, slot.to)
    }

    pub fn triples(&self, edge: EdgeId) -> &[Triple] {
        &self.edges[edge.0].triples
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{ConsumerComponent, ProducerComponent};

    fn stub_catalog() -> ComponentCatalog {
        let mut catalog = ComponentCatalog::new();
        catalog.register::<ProducerComponent>();
        catalog.register::<ConsumerComponent>();
        catalog
    }

    fn blueprint(components: &[(&str, ParameterMap)], connections: &[(&str, &str, ParameterMap)]) -> Blueprint {
        let mut blueprint = Blueprint::new();
        for (name, params) in components {
            blueprint.add_component(*name, params.clone()).unwrap();
        }
        for (from, to, params) in connections {
            blueprint.add_connection(*from, *to, params.clone()).unwrap();
        }
        blueprint
    }

    #[test]
    fn connections_narrow_open_components() {
        let catalog = stub_catalog();
        let blueprint = blueprint(
            &[("Answer", ParameterMap::new()), ("Printer", ParameterMap::new())],
            &[("Answer", "Printer", ParameterMap::new())],
        );

        let mut resolution = Resolution::new(&catalog, &blueprint).unwrap();
        let answer = resolution.node_id("Answer").unwrap();
        let printer = resolution.node_id("Printer").unwrap();
        assert_eq!(resolution.candidates(answer).len(), 2);

        assert!(resolution.prune().unwrap());
        assert_eq!(resolution.candidate_tags(answer), vec!["Producer<short, 0>"]);
        assert_eq!(resolution.candidate_tags(printer), vec!["Consumer<short, 0>"]);

        assert!(!resolution.prune().unwrap());
    }

    #[test]
    fn rejects_what_no_pair_can_carry() {
        struct TestCase {
            name: &'static str,
            connection: ParameterMap,
            interface: Option<&'static str>,
        }

        let cases = vec![
            TestCase {
                name: "pinned interface nobody provides",
                connection: ParameterMap::new().with("NameOfInterface", ["TransformInterface"]),
                interface: Some("TransformInterface"),
            },
            TestCase {
                name: "wrong dimensionality",
                connection: ParameterMap::new().with("Dimensionality", ["3"]),
                interface: None,
            },
            TestCase {
                name: "unrecognized key",
                connection: ParameterMap::new().with("Colour", ["blue"]),
                interface: None,
            },
        ];

        let catalog = stub_catalog();
        for case in cases {
            let blueprint = blueprint(
                &[("Answer", ParameterMap::new()), ("Printer", ParameterMap::new())],
                &[("Answer", "Printer", case.connection)],
            );
            match Resolution::new(&catalog, &blueprint) {
                Err(ResolutionError::UnsatisfiableConnection { from, to, interface, .. }) => {
                    assert_eq!(from, "Answer", "{}", case.name);
                    assert_eq!(to, "Printer", "{}", case.name);
                    assert_eq!(interface.as_deref(), case.interface, "{}", case.name);
                }
                _ => panic!("{}: expected an unsatisfiable connection", case.name),
            }
        }
    }

    #[test]
    fn empty_selection_is_reported_with_reasons() {
        let catalog = stub_catalog();
        let blueprint = blueprint(
            &[("Answer", ParameterMap::new().with("NameOfClass", ["Oracle"]))],
            &[],
        );

        match Resolution::new(&catalog, &blueprint) {
            Err(ResolutionError::NoMatchingComponent { node, reason }) => {
                assert_eq!(node, "Answer");
                assert_eq!(reason, "2 failed NameOfClass");
            }
            _ => panic!("expected no matching component"),
        }
    }

    #[test]
    fn pruning_to_nothing_names_the_connections() {
        let catalog = stub_catalog();
        // Second must accept from Answer and provide to First; no kind does both.
        let blueprint = blueprint(
            &[
                ("Answer", ParameterMap::new()),
                ("First", ParameterMap::new().with("NameOfClass", ["Consumer"])),
                ("Second", ParameterMap::new()),
            ],
            &[
                ("Answer", "Second", ParameterMap::new()),
                ("Second", "First", ParameterMap::new()),
            ],
        );

        let mut resolution = Resolution::new(&catalog, &blueprint).unwrap();
        match resolution.prune() {
            Err(ResolutionError::NoMatchingComponent { node, reason }) => {
                assert!(["Answer", "Second"].contains(&node.as_str()));
                assert!(reason.contains("'Second' -> 'First'") || reason.contains("'Answer' -> 'Second'"));
            }
            other => panic!("expected pruning to fail, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn self_loop_uses_one_candidate_for_both_ends() {
        let catalog = stub_catalog();
        let blueprint = blueprint(
            &[("Loop", ParameterMap::new())],
            &[("Loop", "Loop", ParameterMap::new())],
        );

        // Producer provides but cannot accept, consumer the reverse: no
        // single kind can feed itself.
        match Resolution::new(&catalog, &blueprint) {
            Err(ResolutionError::UnsatisfiableConnection { from, to, .. }) => {
                assert_eq!(from, "Loop");
                assert_eq!(to, "Loop");
            }
            _ => panic!("expected an unsatisfiable self-loop"),
        }
    }

    #[test]
    fn edge_filter_parses_known_keys() {
        let filter = EdgeFilter::parse(
            &ParameterMap::new()
                .with("NameOfInterface", ["AnswerInterface"])
                .with("Dimensionality", ["0"])
                .with("PixelType", ["short"]),
        )
        .unwrap();
        assert_eq!(filter.interface.as_deref(), Some("AnswerInterface"));
        assert_eq!(filter.dimensionality, Some(0));

        assert!(EdgeFilter::parse(&ParameterMap::new().with("Dimensionality", ["two"])).is_err());
        assert!(EdgeFilter::parse(&ParameterMap::new().with("PixelType", ["float", "double"])).is_err());
    }
}
