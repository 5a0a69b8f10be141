// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for component selection, connection resolution and network wiring.

use thiserror::Error;

/// Build-time failures. A build that returns one of these produced no network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No catalog entry survives for this component.
    #[error("No component in the catalog matches '{node}': {reason}")]
    NoMatchingComponent { node: String, reason: String },

    /// More than one catalog entry survives narrowing for this component.
    #[error("Component '{node}' is ambiguous, {} candidates remain: {}", .candidates.len(), .candidates.join(", "))]
    AmbiguousComponent {
        node: String,
        candidates: Vec<String>,
    },

    /// No capability is shared by any pair of candidates of this connection.
    #[error("Connection '{from}' -> '{to}'{} cannot be satisfied: {reason}", interface_suffix(.interface))]
    UnsatisfiableConnection {
        from: String,
        to: String,
        interface: Option<String>,
        reason: String,
    },

    /// Instantiation or hookup left a component unusable.
    #[error("Component '{node}' is misconfigured: {reason}")]
    ConfigurationError { node: String, reason: String },
}

fn interface_suffix(interface: &Option<String>) -> String {
    match interface {
        Some(name) => format!(" (interface '{}')", name),
        None => String::new(),
    }
}
