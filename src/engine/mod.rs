// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Building and running networks.
//!
//! [`NetworkBuilder`] resolves a blueprint against a catalog, constructs one
//! component per blueprint node and wires them. [`ExecutionController`] runs
//! the stages of a multi-stage component in their declared order.

pub mod controller;
mod network;
mod network_builder;
mod resolver;


pub use controller::{ControllerState, ExecutionController};
pub use network::{ComponentInstance, Network};
pub use network_builder::NetworkBuilder;
pub use resolver::{EdgeId, NodeId, Resolution, Triple};
