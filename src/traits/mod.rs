// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod capability;
pub mod component;
pub mod port;
pub mod stage;

pub use capability::{Capability, CapabilitySignature, Pull, Scalar, ValueType};
pub use component::{Component, ComponentKind};
pub use port::{Feed, Port, Slot};
pub use stage::{CompositeState, Reconnect, Stage};
