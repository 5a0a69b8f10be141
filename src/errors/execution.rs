// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while a built network runs.

use crate::engine::ControllerState;
use thiserror::Error;

/// Run-time failures, surfaced to whoever requested the sink update.
///
/// `Clone` so a controller that failed once can report the same failure to
/// every later pull.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The declared execution order and the connected stages disagree.
    #[error(
        "Execution order of '{owner}' does not match its connected stages: missing [{}], unexpected [{}]",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    OrderMismatch {
        owner: String,
        /// Declared in the order but not connected.
        missing: Vec<String>,
        /// Connected but not declared in the order.
        unexpected: Vec<String>,
    },

    /// A stage signalled failure; the stages after it did not run.
    #[error("Stage '{stage}' failed: {message}")]
    ExecutionFailure { stage: String, message: String },

    /// A source was pulled before the caller gave it a value.
    #[error("Component '{component}' has no input set")]
    MissingInput { component: String },

    /// A sink was read before it was ever updated.
    #[error("Component '{component}' has not produced an output yet")]
    NoOutput { component: String },

    #[error("Controller of '{owner}' was already started (state: {state})")]
    AlreadyStarted {
        owner: String,
        state: ControllerState,
    },

    #[error("No component named '{name}' in the network")]
    UnknownComponent { name: String },

    #[error("Component '{name}' is not a sink")]
    NotASink { name: String },

    /// The caller asked for a value type the component does not carry.
    #[error("Component '{component}' exposes {found}, not {expected}")]
    PortMismatch {
        component: String,
        expected: String,
        found: String,
    },
}
