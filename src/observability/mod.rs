// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types live in [`messages`], grouped by subsystem, each with a
//! `Display` implementation and a [`messages::StructuredLog`] implementation
//! that fixes its level and structured fields. [`Logger`] is the handle passed
//! to components so their events nest under the component that emitted them.
//!
//! # Usage
//!
//! ```rust
//! use the_switchyard::observability::messages::StructuredLog;
//! use the_switchyard::observability::messages::controller::ControllerStarted;
//!
//! let msg = ControllerStarted {
//!     owner: "Transform",
//!     stages: 2,
//! };
//!
//! msg.log();
//! ```

mod logger;
pub mod messages;

pub use logger::Logger;
