// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for blueprint loading, composition and export.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A blueprint file was read and converted.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::blueprint::BlueprintLoaded;
///
/// let msg = BlueprintLoaded {
///     path: "configs/two-stage-registration.yaml",
///     components: 7,
///     connections: 8,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BlueprintLoaded<'a> {
    pub path: &'a str,
    pub components: usize,
    pub connections: usize,
}

impl Display for BlueprintLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded blueprint '{}': {} components, {} connections",
            self.path, self.components, self.connections
        )
    }
}

impl StructuredLog for BlueprintLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            components = self.components,
            connections = self.connections,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "blueprint_load",
            span_name = name,
            path = self.path,
            components = self.components,
            connections = self.connections,
        )
    }
}

/// Several blueprints were merged into one.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BlueprintsComposed {
    pub files: usize,
    pub components: usize,
    pub connections: usize,
}

impl Display for BlueprintsComposed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Composed {} blueprints into {} components and {} connections",
            self.files, self.components, self.connections
        )
    }
}

impl StructuredLog for BlueprintsComposed {
    fn log(&self) {
        tracing::info!(
            files = self.files,
            components = self.components,
            connections = self.connections,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "blueprint_compose",
            span_name = name,
            files = self.files,
            components = self.components,
            connections = self.connections,
        )
    }
}

/// A blueprint failed validation.
///
/// # Log Level
/// `warn!` - The caller receives every problem in the returned error
pub struct BlueprintRejected<'a> {
    pub path: &'a str,
    pub problems: usize,
}

impl Display for BlueprintRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Blueprint '{}' failed validation with {} problem(s)",
            self.path, self.problems
        )
    }
}

impl StructuredLog for BlueprintRejected<'_> {
    fn log(&self) {
        tracing::warn!(path = self.path, problems = self.problems, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "blueprint_validation",
            span_name = name,
            path = self.path,
            problems = self.problems,
        )
    }
}
