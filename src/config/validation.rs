// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of blueprint documents.
//!
//! Validation runs before a document becomes a [`Blueprint`](crate::blueprint::Blueprint)
//! and collects every problem instead of stopping at the first, so an author
//! fixes a file in one pass. Two checks run:
//!
//! 1. **Uniqueness**: no component name is declared twice in one document.
//! 2. **References**: every connection endpoint names a declared component.
//!
//! For a set of documents describing one network, names must be unique per
//! document (a name repeated across documents is a merge, not a duplicate)
//! and references resolve against the union of all documents.
//!
//! # Example
//!
//! ```rust
//! use the_switchyard::config::{validate_blueprint_config, BlueprintConfig, ComponentConfig};
//! use std::collections::BTreeMap;
//!
//! let config = BlueprintConfig {
//!     components: vec![ComponentConfig {
//!         name: "Source".to_string(),
//!         parameters: BTreeMap::new(),
//!     }],
//!     connections: vec![],
//! };
//!
//! assert!(validate_blueprint_config(&config).is_ok());
//! ```

use std::collections::HashSet;

use crate::config::BlueprintConfig;
use crate::errors::BlueprintError;

/// Validate one document on its own.
pub fn validate_blueprint_config(config: &BlueprintConfig) -> Result<(), Vec<BlueprintError>> {
    validate_blueprint_set(std::slice::from_ref(config))
}

/// Validate documents that will be composed into one blueprint.
pub fn validate_blueprint_set(configs: &[BlueprintConfig]) -> Result<(), Vec<BlueprintError>> {
    let mut errors = Vec::new();

    for config in configs {
        errors.extend(validate_unique_names(config));
    }

    let declared: HashSet<&str> = configs.iter().flat_map(|c| c.component_names()).collect();
    for config in configs {
        errors.extend(validate_references(config, &declared));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_names(config: &BlueprintConfig) -> Vec<BlueprintError> {
    let mut seen = HashSet::new();
    config
        .component_names()
        .filter(|name| !seen.insert(*name))
        .map(|name| BlueprintError::DuplicateName {
            name: name.to_string(),
        })
        .collect()
}

fn validate_references(config: &BlueprintConfig, declared: &HashSet<&str>) -> Vec<BlueprintError> {
    let mut errors = Vec::new();
    for connection in &config.connections {
        for endpoint in [&connection.source, &connection.target] {
            if !declared.contains(endpoint.as_str()) {
                errors.push(BlueprintError::UnknownNode {
                    from: connection.source.clone(),
                    to: connection.target.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComponentConfig, ConnectionConfig};
    use std::collections::BTreeMap;

    fn component(name: &str) -> ComponentConfig {
        ComponentConfig {
            name: name.to_string(),
            parameters: BTreeMap::new(),
        }
    }

    fn connection(source: &str, target: &str) -> ConnectionConfig {
        ConnectionConfig {
            source: source.to_string(),
            target: target.to_string(),
            parameters: BTreeMap::new(),
        }
    }

    #[test]
    fn valid_document_passes() {
        let config = BlueprintConfig {
            components: vec![component("Source"), component("Sink")],
            connections: vec![connection("Source", "Sink"), connection("Sink", "Source")],
        };
        assert!(validate_blueprint_config(&config).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let config = BlueprintConfig {
            components: vec![component("Source"), component("Source"), component("Sink"), component("Sink")],
            connections: vec![connection("Ghost", "Phantom")],
        };

        let errors = validate_blueprint_config(&config).unwrap_err();

        assert_eq!(
            errors,
            vec![
                BlueprintError::DuplicateName { name: "Source".to_string() },
                BlueprintError::DuplicateName { name: "Sink".to_string() },
                BlueprintError::UnknownNode {
                    from: "Ghost".to_string(),
                    to: "Phantom".to_string(),
                    missing: "Ghost".to_string(),
                },
                BlueprintError::UnknownNode {
                    from: "Ghost".to_string(),
                    to: "Phantom".to_string(),
                    missing: "Phantom".to_string(),
                },
            ]
        );
    }

    #[test]
    fn references_resolve_across_a_set() {
        let images = BlueprintConfig {
            components: vec![component("Fixed"), component("Moving")],
            connections: vec![],
        };
        let registration = BlueprintConfig {
            components: vec![component("Fixed"), component("Stage")],
            connections: vec![connection("Fixed", "Stage"), connection("Moving", "Stage")],
        };

        assert!(validate_blueprint_config(&registration).is_err());
        assert!(validate_blueprint_set(&[images, registration]).is_ok());
    }
}
