// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Every event the crate logs is a small struct implementing `Display` for
//! its human-readable text and [`StructuredLog`] for emitting it with
//! structured fields at its fixed level.
//!
//! # Organization
//!
//! * `blueprint` - blueprint loading, composition and export
//! * `resolution` - candidate selection, connection pruning and network wiring
//! * `controller` - multi-stage execution lifecycle
//! * `component` - events emitted by component instances
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_switchyard::observability::messages::StructuredLog;
//! use the_switchyard::observability::messages::resolution::NetworkBuilt;
//!
//! let msg = NetworkBuilt {
//!     components: 4,
//!     connections: 3,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod blueprint;
pub mod component;
pub mod controller;
pub mod resolution;

/// A message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
