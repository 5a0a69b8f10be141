// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::errors::ExecutionError;
use crate::traits::{Capability, Component, Feed};

/// One built component and the catalog entry it was built from.
pub struct ComponentInstance {
    pub name: String,
    /// Type tag of the selected catalog entry.
    pub class: String,
    pub component: Box<dyn Component>,
}

/// A wired, ready-to-run set of components.
///
/// Nothing runs until a sink is updated; the sink pulls from its providers,
/// which pull from theirs, down to the sources.
pub struct Network {
    instances: BTreeMap<String, ComponentInstance>,
    connections: usize,
}

impl Network {
    pub(crate) fn new(instances: Vec<ComponentInstance>, connections: usize) -> Self {
        Self {
            instances: instances
                .into_iter()
                .map(|instance| (instance.name.clone(), instance))
                .collect(),
            connections,
        }
    }

    pub fn instance_names(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Type tag of the catalog entry selected for `name`.
    pub fn class_of(&self, name: &str) -> Option<&str> {
        self.instances.get(name).map(|i| i.class.as_str())
    }

    pub fn component(&self, name: &str) -> Option<&dyn Component> {
        self.instances.get(name).map(|i| i.component.as_ref())
    }

    pub fn component_count(&self) -> usize {
        self.instances.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections
    }

    /// Names of the terminal components, in name order.
    pub fn sinks(&self) -> impl Iterator<Item = &str> {
        self.instances
            .values()
            .filter(|i| i.component.is_sink())
            .map(|i| i.name.as_str())
    }

    fn instance(&self, name: &str) -> Result<&ComponentInstance, ExecutionError> {
        self.instances
            .get(name)
            .ok_or_else(|| ExecutionError::UnknownComponent {
                name: name.to_string(),
            })
    }

    /// Give a source the value it hands downstream.
    pub fn set_input<V: Clone + Send + Sync + 'static>(
        &self,
        source: &str,
        value: V,
    ) -> Result<(), ExecutionError> {
        let instance = self.instance(source)?;
        let port = instance.component.input();
        let slot = port
            .as_ref()
            .and_then(|port| port.handle::<Feed<V>>())
            .ok_or_else(|| mismatch::<V>(instance, port.as_ref().map(|p| p.signature().to_string())))?;
        slot.set(value);
        Ok(())
    }

    /// The last value a sink produced.
    pub fn output<V: Clone + Send + Sync + 'static>(&self, sink: &str) -> Result<V, ExecutionError> {
        let instance = self.instance(sink)?;
        let port = instance.component.output();
        let slot = port
            .as_ref()
            .and_then(|port| port.handle::<Feed<V>>())
            .ok_or_else(|| mismatch::<V>(instance, port.as_ref().map(|p| p.signature().to_string())))?;
        slot.get().ok_or_else(|| ExecutionError::NoOutput {
            component: sink.to_string(),
        })
    }

    /// Run the pipeline behind one sink.
    pub async fn update_sink(&self, sink: &str) -> Result<(), ExecutionError> {
        let instance = self.instance(sink)?;
        if !instance.component.is_sink() {
            return Err(ExecutionError::NotASink {
                name: sink.to_string(),
            });
        }
        instance.component.update().await
    }

    /// Update every sink in name order, stopping at the first failure.
    pub async fn update(&self) -> Result<(), ExecutionError> {
        for instance in self.instances.values().filter(|i| i.component.is_sink()) {
            instance.component.update().await?;
        }
        Ok(())
    }
}

fn mismatch<V: Clone + Send + Sync + 'static>(
    instance: &ComponentInstance,
    found: Option<String>,
) -> ExecutionError {
    ExecutionError::PortMismatch {
        component: instance.name.clone(),
        expected: Feed::<V>::signature().to_string(),
        found: found.unwrap_or_else(|| "no external port".to_string()),
    }
}
