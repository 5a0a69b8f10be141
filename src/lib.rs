// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // built-in components
pub mod blueprint;  // declarative component graph
pub mod catalog;    // descriptors, criteria, selection
pub mod config;     // blueprint files + validation
pub mod engine;     // resolver, builder, controller
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // component and capability contracts

pub use crate::blueprint::{Blueprint, ParameterMap};
pub use crate::catalog::ComponentCatalog;
pub use crate::engine::{Network, NetworkBuilder};
