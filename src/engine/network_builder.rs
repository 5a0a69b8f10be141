// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::blueprint::Blueprint;
use crate::catalog::ComponentCatalog;
use crate::engine::network::{ComponentInstance, Network};
use crate::engine::resolver::{NodeId, Resolution};
use crate::errors::ResolutionError;
use crate::observability::messages::component::ComponentConstructed;
use crate::observability::messages::resolution::{
    AmbiguousComponentDetected, ComponentMisconfigured, NetworkBuilt,
};
use crate::observability::messages::StructuredLog;
use crate::observability::Logger;
use crate::traits::Port;

/// Turns a blueprint into a wired [`Network`].
///
/// The build is all-or-nothing: any selection, construction or hookup
/// problem returns an error and no network.
pub struct NetworkBuilder<'a> {
    catalog: &'a ComponentCatalog,
    logger: Logger,
}

impl<'a> NetworkBuilder<'a> {
    pub fn new(catalog: &'a ComponentCatalog) -> Self {
        Self {
            catalog,
            logger: Logger::root(),
        }
    }

    /// The logger every component is handed, scoped per instance.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Select and prune candidates without building anything.
    pub fn resolve(&self, blueprint: &Blueprint) -> Result<Resolution<'a>, ResolutionError> {
        let mut resolution = Resolution::with_logger(self.catalog, blueprint, self.logger.clone())?;
        resolution.prune()?;
        Ok(resolution)
    }

    pub fn build(&self, blueprint: &Blueprint) -> Result<Network, ResolutionError> {
        let resolution = self.resolve(blueprint)?;
        let mut instances = self.instantiate(&resolution, blueprint)?;
        let connections = self.hook_up(&resolution, &mut instances)?;
        self.check_connections(&instances)?;

        self.logger.in_scope(|| {
            NetworkBuilt {
                components: instances.len(),
                connections,
            }
            .log()
        });
        Ok(Network::new(instances, connections))
    }

    /// One instance per node, indexed like the resolution's nodes.
    fn instantiate(
        &self,
        resolution: &Resolution<'_>,
        blueprint: &Blueprint,
    ) -> Result<Vec<ComponentInstance>, ResolutionError> {
        let mut instances = Vec::new();
        for node in resolution.node_ids() {
            let name = resolution.node_name(node);
            let descriptor = match resolution.candidates(node) {
                [only] => &self.catalog[*only],
                _ => {
                    let candidates = resolution.candidate_tags(node);
                    self.logger.in_scope(|| {
                        AmbiguousComponentDetected {
                            node: name,
                            candidates: &candidates,
                        }
                        .log()
                    });
                    return Err(ResolutionError::AmbiguousComponent {
                        node: name.to_string(),
                        candidates,
                    });
                }
            };

            let class = descriptor.type_tag();
            let parameters = blueprint.parameter_map(name).cloned().unwrap_or_default();
            let component = descriptor
                .instantiate(name, &parameters, self.logger.for_component(name, &class))
                .map_err(|reason| self.misconfigured(name, reason))?;
            self.logger
                .in_scope(|| ComponentConstructed { name, class: &class }.log());

            instances.push(ComponentInstance {
                name: name.to_string(),
                class,
                component,
            });
        }
        Ok(instances)
    }

    /// Every provider hands out its ports before any acceptor takes one.
    /// Returns the number of ports delivered.
    fn hook_up(
        &self,
        resolution: &Resolution<'_>,
        instances: &mut [ComponentInstance],
    ) -> Result<usize, ResolutionError> {
        let mut deliveries: Vec<(NodeId, NodeId, Port)> = Vec::new();
        for edge in resolution.edge_ids() {
            let (from, to) = resolution.endpoints(edge);
            for triple in resolution.triples(edge) {
                let provider = &instances[from.0];
                let port = provider.component.provide(&triple.capability).ok_or_else(|| {
                    self.misconfigured(
                        &provider.name,
                        format!("does not provide {}", triple.capability),
                    )
                })?;
                deliveries.push((from, to, port));
            }
        }

        let delivered = deliveries.len();
        for (from, to, port) in deliveries {
            let capability = port.signature().to_string();
            let acceptor = &mut instances[to.0];
            if !acceptor.component.accept(port) {
                let reason = format!(
                    "refused {} from '{}'",
                    capability,
                    resolution.node_name(from)
                );
                return Err(self.misconfigured(&acceptor.name, reason));
            }
        }
        Ok(delivered)
    }

    fn check_connections(&self, instances: &[ComponentInstance]) -> Result<(), ResolutionError> {
        match instances
            .iter()
            .find(|instance| !instance.component.connections_satisfied())
        {
            Some(instance) => Err(self.misconfigured(
                &instance.name,
                "its connections are not satisfied after hookup".to_string(),
            )),
            None => Ok(()),
        }
    }

    fn misconfigured(&self, node: &str, reason: String) -> ResolutionError {
        self.logger.in_scope(|| {
            ComponentMisconfigured {
                node,
                reason: &reason,
            }
            .log()
        });
        ResolutionError::ConfigurationError {
            node: node.to_string(),
            reason,
        }
    }
}
