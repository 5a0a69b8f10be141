// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types emitted by component instances.
//!
//! Components log through the [`Logger`](crate::observability::Logger) they
//! were constructed with, so these events carry the component's name and
//! class from the enclosing span.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A component instance was created.
///
/// # Log Level
/// `debug!` - Detailed build trace
pub struct ComponentConstructed<'a> {
    pub name: &'a str,
    pub class: &'a str,
}

impl Display for ComponentConstructed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Constructed '{}' as {}", self.name, self.class)
    }
}

impl StructuredLog for ComponentConstructed<'_> {
    fn log(&self) {
        tracing::debug!(name = self.name, class = self.class, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "component",
            span_name = name,
            name = self.name,
            class = self.class,
        )
    }
}

/// A component took a provider's port.
///
/// # Log Level
/// `debug!` - Detailed build trace
pub struct PortAccepted<'a> {
    pub component: &'a str,
    pub capability: &'a str,
}

impl Display for PortAccepted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "'{}' accepted {}", self.component, self.capability)
    }
}

impl StructuredLog for PortAccepted<'_> {
    fn log(&self) {
        tracing::debug!(
            component = self.component,
            capability = self.capability,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "hookup",
            span_name = name,
            component = self.component,
            capability = self.capability,
        )
    }
}

/// A component refused a port it was offered.
///
/// # Log Level
/// `warn!` - Usually followed by a misconfiguration error
pub struct PortRefused<'a> {
    pub component: &'a str,
    pub capability: &'a str,
}

impl Display for PortRefused<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "'{}' refused {}", self.component, self.capability)
    }
}

impl StructuredLog for PortRefused<'_> {
    fn log(&self) {
        tracing::warn!(
            component = self.component,
            capability = self.capability,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "hookup",
            span_name = name,
            component = self.component,
            capability = self.capability,
        )
    }
}

/// A sink pulled a fresh value from upstream.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SinkUpdated<'a> {
    pub component: &'a str,
}

impl Display for SinkUpdated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Sink '{}' updated", self.component)
    }
}

impl StructuredLog for SinkUpdated<'_> {
    fn log(&self) {
        tracing::info!(component = self.component, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("sink", span_name = name, component = self.component)
    }
}

/// A cached result was dropped after its upstream re-ran.
///
/// # Log Level
/// `debug!` - Detailed execution trace
pub struct CachedResultCleared<'a> {
    pub component: &'a str,
}

impl Display for CachedResultCleared<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "'{}' cleared its cached result", self.component)
    }
}

impl StructuredLog for CachedResultCleared<'_> {
    fn log(&self) {
        tracing::debug!(component = self.component, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("reconnect", span_name = name, component = self.component)
    }
}
