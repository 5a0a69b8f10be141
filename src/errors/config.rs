// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::BlueprintError;
use thiserror::Error;

/// Errors that can occur while loading blueprint files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read blueprint file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its contents are not a valid blueprint document.
    #[error("Failed to parse blueprint file '{path}': {message}")]
    Parse { path: String, message: String },

    /// The file extension does not map to a supported format.
    #[error("Unsupported blueprint format '{extension}' for '{path}' (expected yaml, yml, json or toml)")]
    UnsupportedFormat { path: String, extension: String },

    /// Every problem found by validation, reported together.
    #[error("Blueprint validation failed:\n{}", format_errors(.0))]
    Invalid(Vec<BlueprintError>),

    /// Composing several files produced an authoring error.
    #[error(transparent)]
    Blueprint(#[from] BlueprintError),
}

fn format_errors(errors: &[BlueprintError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
