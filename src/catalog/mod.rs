// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The component catalog and criteria matching.
//!
//! A [`ComponentCatalog`] is a table of [`ComponentDescriptor`]s, one per
//! concrete component kind (class, value type, dimensionality). Matching a
//! blueprint parameter map against a descriptor evaluates each key to a
//! [`CriterionStatus`]: static properties decide what they can, the component
//! decides the rest, and anything still undecided fails.

mod criterion;
mod descriptor;
mod registry;
mod selector;

pub use criterion::{CriterionStatus, TemplateProperties};
pub use descriptor::{ComponentDescriptor, DescriptorId};
pub use registry::ComponentCatalog;
pub use selector::{ComponentSelector, Rejection, Selection};
