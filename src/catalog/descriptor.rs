// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::{self, Debug, Display, Formatter};

use crate::blueprint::ParameterMap;
use crate::catalog::criterion::{CriterionStatus, TemplateProperties};
use crate::observability::Logger;
use crate::traits::{CapabilitySignature, Component, ComponentKind, ValueType};

/// Index of a descriptor in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(pub(crate) usize);

impl Display for DescriptorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Matcher = fn(&str, &[String]) -> CriterionStatus;
type Constructor = fn(&str, &ParameterMap, Logger) -> Result<Box<dyn Component>, String>;

/// One row of the catalog: everything known about a component kind before
/// an instance exists, plus how to make one.
#[derive(Clone)]
pub struct ComponentDescriptor {
    properties: TemplateProperties,
    provided: Vec<CapabilitySignature>,
    accepted: Vec<CapabilitySignature>,
    matcher: Matcher,
    constructor: Constructor,
}

fn construct_boxed<K: ComponentKind>(
    name: &str,
    parameters: &ParameterMap,
    logger: Logger,
) -> Result<Box<dyn Component>, String> {
    let component = K::construct(name, parameters, logger)?;
    Ok(Box::new(component))
}

impl ComponentDescriptor {
    pub fn of<K: ComponentKind>() -> Self {
        Self {
            properties: TemplateProperties {
                class_name: K::CLASS_NAME,
                value_type: K::value_type(),
                dimensionality: K::dimensionality(),
            },
            provided: K::provided(),
            accepted: K::accepted(),
            matcher: K::meets_criterion,
            constructor: construct_boxed::<K>,
        }
    }

    /// `Class<value type, dimensionality>`, unique within a catalog.
    pub fn type_tag(&self) -> String {
        format!(
            "{}<{}, {}>",
            self.properties.class_name, self.properties.value_type, self.properties.dimensionality
        )
    }

    pub fn class_name(&self) -> &'static str {
        self.properties.class_name
    }

    pub fn value_type(&self) -> ValueType {
        self.properties.value_type
    }

    pub fn dimensionality(&self) -> usize {
        self.properties.dimensionality
    }

    pub fn provided(&self) -> &[CapabilitySignature] {
        &self.provided
    }

    pub fn accepted(&self) -> &[CapabilitySignature] {
        &self.accepted
    }

    /// Static properties decide first; only `Unknown` reaches the
    /// component's own matcher, whose non-`Satisfied` answers all fail.
    pub fn meets_criterion(&self, key: &str, values: &[String]) -> CriterionStatus {
        match self.properties.check(key, values) {
            CriterionStatus::Unknown => match (self.matcher)(key, values) {
                CriterionStatus::Satisfied => CriterionStatus::Satisfied,
                _ => CriterionStatus::Failed,
            },
            decided => decided,
        }
    }

    /// The first key of `parameters` this descriptor fails, in key order.
    pub fn first_failing<'a>(&self, parameters: &'a ParameterMap) -> Option<&'a str> {
        parameters
            .iter()
            .find(|(key, values)| self.meets_criterion(key, values) == CriterionStatus::Failed)
            .map(|(key, _)| key.as_str())
    }

    pub fn matches(&self, parameters: &ParameterMap) -> bool {
        self.first_failing(parameters).is_none()
    }

    pub fn instantiate(
        &self,
        name: &str,
        parameters: &ParameterMap,
        logger: Logger,
    ) -> Result<Box<dyn Component>, String> {
        (self.constructor)(name, parameters, logger)
    }
}

impl Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_tag", &self.type_tag())
            .field("provided", &self.provided)
            .field("accepted", &self.accepted)
            .finish()
    }
}
