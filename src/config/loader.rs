// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::blueprint::{Blueprint, ParameterMap};
use crate::config::validation::{validate_blueprint_config, validate_blueprint_set};
use crate::errors::{BlueprintError, ConfigError};
use crate::observability::messages::blueprint::{BlueprintLoaded, BlueprintRejected, BlueprintsComposed};
use crate::observability::messages::StructuredLog;

/// A blueprint document as written in a file.
///
/// # Example
/// ```yaml
/// components:
///   - name: FixedImage
///     parameters:
///       NameOfClass: ImageSourceComponent
///       Dimensionality: 2
///       PixelType: float
///   - name: Transform
///     parameters:
///       NameOfClass: CompositeTransformComponent
///       ExecutionOrder: [Rigid, Affine]
/// connections:
///   - source: FixedImage
///     target: Rigid
///     parameters:
///       NameOfInterface: FixedImageInterface
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlueprintConfig {
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, ConfigValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, ConfigValue>,
}

/// A parameter value: one scalar or a list of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    List(Vec<ConfigScalar>),
    Single(ConfigScalar),
}

/// Scalars are written naturally (`Dimensionality: 2`) and stored as strings.
///
/// Every format is read through `serde_yaml::Value`, so a float keeps its
/// fractional part: `2.0` stays `"2.0"` and never passes for the integer `2`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub struct ConfigScalar(String);

impl ConfigScalar {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<serde_yaml::Value> for ConfigScalar {
    type Error = String;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        match value {
            serde_yaml::Value::String(text) => Ok(ConfigScalar(text)),
            serde_yaml::Value::Number(number) => Ok(ConfigScalar(number.to_string())),
            serde_yaml::Value::Bool(flag) => Ok(ConfigScalar(flag.to_string())),
            other => Err(format!("expected a scalar parameter value, found {:?}", other)),
        }
    }
}

impl Display for ConfigScalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ConfigValue {
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            ConfigValue::List(values) => values.iter().map(ToString::to_string).collect(),
            ConfigValue::Single(value) => vec![value.to_string()],
        }
    }
}

fn parameter_map(parameters: &BTreeMap<String, ConfigValue>) -> ParameterMap {
    parameters
        .iter()
        .map(|(key, value)| (key.clone(), value.to_strings()))
        .collect()
}

impl BlueprintConfig {
    /// Build the blueprint this document describes.
    pub fn into_blueprint(self) -> Result<Blueprint, BlueprintError> {
        self.to_fragment(&BTreeSet::new())
    }

    /// Like [`BlueprintConfig::into_blueprint`], but connection endpoints in
    /// `foreign` are declared with an empty map, for documents that connect
    /// to components another file declares.
    fn to_fragment(&self, foreign: &BTreeSet<String>) -> Result<Blueprint, BlueprintError> {
        let mut blueprint = Blueprint::new();
        for component in &self.components {
            blueprint.add_component(component.name.clone(), parameter_map(&component.parameters))?;
        }
        for connection in &self.connections {
            for endpoint in [&connection.source, &connection.target] {
                if foreign.contains(endpoint) && !blueprint.contains_component(endpoint) {
                    blueprint.set_component(endpoint.clone(), ParameterMap::new());
                }
            }
            blueprint.add_connection(
                connection.source.clone(),
                connection.target.clone(),
                parameter_map(&connection.parameters),
            )?;
        }
        Ok(blueprint)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name.as_str())
    }
}

/// Serialization format of a blueprint file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintFormat {
    Yaml,
    Json,
    Toml,
}

impl BlueprintFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Ok(BlueprintFormat::Yaml),
            "json" => Ok(BlueprintFormat::Json),
            "toml" => Ok(BlueprintFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
                extension,
            }),
        }
    }
}

/// Parse a blueprint document from text.
pub fn parse_blueprint(
    content: &str,
    format: BlueprintFormat,
    path: &str,
) -> Result<BlueprintConfig, ConfigError> {
    let parsed = match format {
        BlueprintFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        BlueprintFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        BlueprintFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_string(),
        message,
    })
}

/// Read and parse a blueprint file without validating it.
pub fn load_blueprint<P: AsRef<Path>>(path: P) -> Result<BlueprintConfig, ConfigError> {
    let path = path.as_ref();
    let format = BlueprintFormat::from_path(path)?;
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    parse_blueprint(&content, format, &display)
}

/// Load a blueprint file, reporting every validation problem at once.
pub fn load_and_validate_blueprint<P: AsRef<Path>>(path: P) -> Result<Blueprint, ConfigError> {
    let display = path.as_ref().display().to_string();
    let config = load_blueprint(&path)?;

    if let Err(errors) = validate_blueprint_config(&config) {
        BlueprintRejected {
            path: &display,
            problems: errors.len(),
        }
        .log();
        return Err(ConfigError::Invalid(errors));
    }

    let blueprint = config.into_blueprint()?;
    BlueprintLoaded {
        path: &display,
        components: blueprint.component_count(),
        connections: blueprint.connection_count(),
    }
    .log();
    Ok(blueprint)
}

/// Load several files that together describe one network.
///
/// A file may connect to components declared in another. Components and
/// connections declared in more than one file merge; conflicting values for
/// the same key are an error.
pub fn load_blueprints<P: AsRef<Path>>(paths: &[P]) -> Result<Blueprint, ConfigError> {
    let documents = paths
        .iter()
        .map(load_blueprint)
        .collect::<Result<Vec<_>, _>>()?;

    if let Err(errors) = validate_blueprint_set(&documents) {
        let names = paths
            .iter()
            .map(|p| p.as_ref().display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        BlueprintRejected {
            path: &names,
            problems: errors.len(),
        }
        .log();
        return Err(ConfigError::Invalid(errors));
    }

    let mut blueprint = Blueprint::new();
    for (path, document) in paths.iter().zip(&documents) {
        let own = document
            .component_names()
            .map(str::to_string)
            .collect::<BTreeSet<_>>();
        let foreign = documents
            .iter()
            .flat_map(|d| d.component_names())
            .filter(|name| !own.contains(*name))
            .map(str::to_string)
            .collect::<BTreeSet<_>>();

        let fragment = document.to_fragment(&foreign)?;
        BlueprintLoaded {
            path: &path.as_ref().display().to_string(),
            components: document.components.len(),
            connections: document.connections.len(),
        }
        .log();
        blueprint.compose_with(&fragment)?;
    }

    BlueprintsComposed {
        files: paths.len(),
        components: blueprint.component_count(),
        connections: blueprint.connection_count(),
    }
    .log();
    Ok(blueprint)
}
