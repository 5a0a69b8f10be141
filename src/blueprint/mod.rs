// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The declarative description of a component network.
//!
//! A [`Blueprint`] names components and the connections between them. Each
//! carries a [`ParameterMap`] of selection criteria and settings; nothing in a
//! blueprint names a concrete implementation: the network builder picks
//! those from a catalog.

mod dot;
mod graph;
mod parameter_map;

pub use graph::Blueprint;
pub use parameter_map::ParameterMap;
