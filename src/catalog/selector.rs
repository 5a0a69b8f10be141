// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::blueprint::ParameterMap;
use crate::catalog::descriptor::DescriptorId;
use crate::catalog::registry::ComponentCatalog;

/// A catalog entry ruled out, and the first key it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub descriptor: DescriptorId,
    pub key: String,
}

/// Result of matching one parameter map against the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub candidates: Vec<DescriptorId>,
    pub rejections: Vec<Rejection>,
}

impl Selection {
    /// Rejection counts per failing key, e.g.
    /// `"24 failed NameOfClass, 3 failed Dimensionality"`.
    pub fn summary(&self) -> String {
        if self.rejections.is_empty() {
            return "the catalog is empty".to_string();
        }
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for rejection in &self.rejections {
            *counts.entry(rejection.key.as_str()).or_default() += 1;
        }
        let mut counts = counts.into_iter().collect::<Vec<_>>();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        counts
            .iter()
            .map(|(key, count)| format!("{} failed {}", count, key))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Filters the catalog down to the entries a parameter map admits.
pub struct ComponentSelector<'a> {
    catalog: &'a ComponentCatalog,
}

impl<'a> ComponentSelector<'a> {
    pub fn new(catalog: &'a ComponentCatalog) -> Self {
        Self { catalog }
    }

    pub fn select(&self, parameters: &ParameterMap) -> Selection {
        let mut selection = Selection::default();
        for (id, descriptor) in self.catalog.iter() {
            match descriptor.first_failing(parameters) {
                None => selection.candidates.push(id),
                Some(key) => selection.rejections.push(Rejection {
                    descriptor: id,
                    key: key.to_string(),
                }),
            }
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(catalog: &ComponentCatalog, selection: &Selection) -> Vec<String> {
        selection
            .candidates
            .iter()
            .map(|id| catalog[*id].type_tag())
            .collect()
    }

    #[test]
    fn narrows_by_static_properties() {
        let catalog = ComponentCatalog::with_defaults();
        let selector = ComponentSelector::new(&catalog);

        let selection = selector.select(
            &ParameterMap::new()
                .with("NameOfClass", ["ImageSinkComponent"])
                .with("Dimensionality", ["3"])
                .with("PixelType", ["short"]),
        );

        assert_eq!(tags(&catalog, &selection), vec!["ImageSinkComponent<short, 3>"]);
        assert_eq!(selection.rejections.len(), catalog.len() - 1);
    }

    #[test]
    fn empty_map_admits_everything() {
        let catalog = ComponentCatalog::with_defaults();
        let selection = ComponentSelector::new(&catalog).select(&ParameterMap::new());
        assert_eq!(selection.candidates.len(), catalog.len());
    }

    #[test]
    fn unrecognized_key_fails_closed() {
        let catalog = ComponentCatalog::with_defaults();
        let selection = ComponentSelector::new(&catalog).select(
            &ParameterMap::new()
                .with("NameOfClass", ["ImageSourceComponent"])
                .with("Colour", ["blue"]),
        );

        assert!(selection.candidates.is_empty());
        assert_eq!(selection.summary(), "28 failed Colour");
    }

    #[test]
    fn component_specific_criteria_reach_the_component() {
        let catalog = ComponentCatalog::with_defaults();
        let selector = ComponentSelector::new(&catalog);

        let valid = selector.select(
            &ParameterMap::new().with("ExecutionOrder", ["Rigid", "Affine"]),
        );
        assert_eq!(valid.candidates.len(), 4);
        assert!(valid
            .candidates
            .iter()
            .all(|id| catalog[*id].class_name() == "CompositeTransformComponent"));

        let repeated = selector.select(
            &ParameterMap::new().with("ExecutionOrder", ["Rigid", "Rigid"]),
        );
        assert!(repeated.candidates.is_empty());
    }

    #[test]
    fn summary_orders_by_count() {
        let selection = Selection {
            candidates: vec![],
            rejections: vec![
                Rejection { descriptor: DescriptorId(0), key: "Dimensionality".to_string() },
                Rejection { descriptor: DescriptorId(1), key: "NameOfClass".to_string() },
                Rejection { descriptor: DescriptorId(2), key: "NameOfClass".to_string() },
            ],
        };
        assert_eq!(selection.summary(), "2 failed NameOfClass, 1 failed Dimensionality");
        assert_eq!(Selection::default().summary(), "the catalog is empty");
    }
}
