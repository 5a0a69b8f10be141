// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod capabilities;
pub mod components;
pub mod data;
pub mod factory;

pub use components::*;
pub use data::{Image, Transform, TransformStep};
pub use factory::{list_available_classes, register_defaults};
