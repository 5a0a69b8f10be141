// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::ops::Index;

use crate::backends::local::factory::register_defaults;
use crate::catalog::descriptor::{ComponentDescriptor, DescriptorId};
use crate::traits::ComponentKind;

/// Table of every component kind the network builder may choose from.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    descriptors: Vec<ComponentDescriptor>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the built-in components.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        register_defaults(&mut catalog);
        catalog
    }

    /// Add a kind. Registering the same type tag twice returns the first id.
    pub fn register<K: ComponentKind>(&mut self) -> DescriptorId {
        let descriptor = ComponentDescriptor::of::<K>();
        if let Some(existing) = self.find(&descriptor.type_tag()) {
            return existing;
        }
        self.descriptors.push(descriptor);
        DescriptorId(self.descriptors.len() - 1)
    }

    pub fn find(&self, type_tag: &str) -> Option<DescriptorId> {
        self.descriptors
            .iter()
            .position(|d| d.type_tag() == type_tag)
            .map(DescriptorId)
    }

    pub fn get(&self, id: DescriptorId) -> Option<&ComponentDescriptor> {
        self.descriptors.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &ComponentDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (DescriptorId(i), d))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn class_names(&self) -> BTreeSet<&'static str> {
        self.descriptors.iter().map(|d| d.class_name()).collect()
    }
}

impl Index<DescriptorId> for ComponentCatalog {
    type Output = ComponentDescriptor;

    fn index(&self, id: DescriptorId) -> &Self::Output {
        &self.descriptors[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::components::ImageSourceComponent;

    #[test]
    fn registering_twice_is_idempotent() {
        let mut catalog = ComponentCatalog::new();
        let first = catalog.register::<ImageSourceComponent<f32, 2>>();
        let second = catalog.register::<ImageSourceComponent<f32, 2>>();
        let other = catalog.register::<ImageSourceComponent<f32, 3>>();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[other].type_tag(), "ImageSourceComponent<float, 3>");
    }

    #[test]
    fn default_catalog_lists_builtin_classes() {
        let catalog = ComponentCatalog::with_defaults();

        assert_eq!(catalog.len(), 28);
        assert_eq!(
            catalog.class_names().into_iter().collect::<Vec<_>>(),
            vec![
                "CompositeTransformComponent",
                "ImageSinkComponent",
                "ImageSourceComponent",
                "RegistrationStageComponent",
                "ResamplerComponent",
            ]
        );
        assert!(catalog.find("ImageSinkComponent<unsigned char, 2>").is_some());
        assert!(catalog.find("ResamplerComponent<short, 2>").is_none());
        assert!(catalog.get(DescriptorId(catalog.len())).is_none());
    }
}
