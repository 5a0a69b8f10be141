// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while authoring a blueprint.

use thiserror::Error;

/// Errors reported immediately by blueprint authoring operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    /// A component with this name is already declared.
    #[error("Component '{name}' is already declared")]
    DuplicateName { name: String },

    /// A connection names an endpoint that was never declared.
    #[error("Connection '{from}' -> '{to}' references undeclared component '{missing}'")]
    UnknownNode {
        from: String,
        to: String,
        missing: String,
    },

    /// Two blueprints being composed disagree on one parameter.
    #[error("Parameter '{key}' of {owner} has conflicting values {left:?} and {right:?}")]
    ConflictingParameter {
        owner: String,
        key: String,
        left: Vec<String>,
        right: Vec<String>,
    },

    /// A DOT description could not be read back into a blueprint.
    #[error("DOT syntax error: {message}")]
    DotSyntax { message: String },
}
