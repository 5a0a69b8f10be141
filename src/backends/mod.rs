// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Component implementations the catalog can select from.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process components for image registration pipelines:
//! - **Sources and sinks**: entry and exit points the caller feeds and reads
//! - **Registration stages**: estimate one transform step from a fixed and a moving image
//! - **Composite transform**: runs its stages in a configured order
//! - **Resampler**: applies the composite transform to the moving image
//!
//! ## Stub Backend (Test-Only)
//! Minimal components and stages for exercising the resolver and the
//! execution controller without images. Only compiled for tests.
//!
//! # Architecture
//!
//! ```text
//! Blueprint → Selection → Component Instance → Hookup → Network
//! ```
//!
//! Each backend provides:
//! - **Factory**: registers its component kinds with a catalog
//! - **Components**: implement `Component` and `ComponentKind`
//! - **Capabilities**: the typed handles its components exchange
//!
//! # Examples
//!
//! ```rust
//! use the_switchyard::catalog::ComponentCatalog;
//!
//! let catalog = ComponentCatalog::with_defaults();
//! assert!(catalog.find("ImageSourceComponent<float, 2>").is_some());
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
