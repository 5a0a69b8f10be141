// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for component selection, connection resolution and wiring.
//!
//! This module contains message types for logging events related to:
//! * Per-component candidate selection against the catalog
//! * Connection pruning while the resolver converges
//! * Selection failures (no match, ambiguity, misconfiguration)
//! * Completed network builds

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Candidate selection finished for one component.
///
/// # Log Level
/// `debug!` - Detailed resolution trace
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::resolution::CandidatesSelected;
///
/// let candidates = vec!["ImageSinkComponent<float, 2>".to_string()];
/// let msg = CandidatesSelected {
///     node: "ResultImage",
///     candidates: &candidates,
///     rejected: 15,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct CandidatesSelected<'a> {
    pub node: &'a str,
    pub candidates: &'a [String],
    pub rejected: usize,
}

impl Display for CandidatesSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Component '{}' matches {} catalog entries ({} rejected): [{}]",
            self.node,
            self.candidates.len(),
            self.rejected,
            self.candidates.join(", ")
        )
    }
}

impl StructuredLog for CandidatesSelected<'_> {
    fn log(&self) {
        tracing::debug!(
            node = self.node,
            candidate_count = self.candidates.len(),
            rejected = self.rejected,
            candidates = self.candidates.join(", "),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "selection",
            span_name = name,
            node = self.node,
            candidate_count = self.candidates.len(),
        )
    }
}

/// A connection removed candidates from one of its endpoints.
///
/// # Log Level
/// `debug!` - Detailed resolution trace
pub struct CandidatesPruned<'a> {
    pub node: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    pub removed: usize,
    pub remaining: usize,
}

impl Display for CandidatesPruned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connection '{}' -> '{}' pruned {} candidate(s) of '{}', {} remaining",
            self.from, self.to, self.removed, self.node, self.remaining
        )
    }
}

impl StructuredLog for CandidatesPruned<'_> {
    fn log(&self) {
        tracing::debug!(
            node = self.node,
            from = self.from,
            to = self.to,
            removed = self.removed,
            remaining = self.remaining,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "pruning",
            span_name = name,
            node = self.node,
            from = self.from,
            to = self.to,
        )
    }
}

/// Nothing in the catalog fits a component.
///
/// # Log Level
/// `warn!` - The build fails and the caller receives the error
pub struct NoMatchingComponentFound<'a> {
    pub node: &'a str,
    pub reason: &'a str,
}

impl Display for NoMatchingComponentFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No catalog entry matches component '{}': {}",
            self.node, self.reason
        )
    }
}

impl StructuredLog for NoMatchingComponentFound<'_> {
    fn log(&self) {
        tracing::warn!(node = self.node, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "selection",
            span_name = name,
            node = self.node,
        )
    }
}

/// More than one catalog entry survived for a component.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct AmbiguousComponentDetected<'a> {
    pub node: &'a str,
    pub candidates: &'a [String],
}

impl Display for AmbiguousComponentDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Component '{}' is ambiguous, candidates: {}",
            self.node,
            self.candidates.join(", ")
        )
    }
}

impl StructuredLog for AmbiguousComponentDetected<'_> {
    fn log(&self) {
        tracing::error!(
            node = self.node,
            candidate_count = self.candidates.len(),
            candidates = self.candidates.join(", "),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "selection",
            span_name = name,
            node = self.node,
            candidate_count = self.candidates.len(),
        )
    }
}

/// A component was left unusable after construction or hookup.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ComponentMisconfigured<'a> {
    pub node: &'a str,
    pub reason: &'a str,
}

impl Display for ComponentMisconfigured<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Component '{}' is misconfigured: {}", self.node, self.reason)
    }
}

impl StructuredLog for ComponentMisconfigured<'_> {
    fn log(&self) {
        tracing::error!(node = self.node, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "hookup",
            span_name = name,
            node = self.node,
        )
    }
}

/// Every component was instantiated and connected.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NetworkBuilt {
    pub components: usize,
    pub connections: usize,
}

impl Display for NetworkBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built network: {} components, {} port connections",
            self.components, self.connections
        )
    }
}

impl StructuredLog for NetworkBuilt {
    fn log(&self) {
        tracing::info!(
            components = self.components,
            connections = self.connections,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "network",
            span_name = name,
            components = self.components,
            connections = self.connections,
        )
    }
}
