// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Capability contracts shared by a providing and an accepting component.
//!
//! A capability is identified by its name, the concrete value type it carries
//! and its dimensionality. Two endpoints are compatible only when all three
//! agree, which the resolver decides by comparing [`CapabilitySignature`]s
//! before any component exists.

use std::any::TypeId;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use async_trait::async_trait;

use crate::errors::ExecutionError;

/// Numeric value types components may be instantiated for.
///
/// `NAME` is the spelling used by blueprint criteria (`PixelType`,
/// `InternalComputationValueType`).
pub trait Scalar: Copy + Default + PartialEq + Debug + FromStr + Send + Sync + 'static {
    const NAME: &'static str;
}

impl Scalar for f32 {
    const NAME: &'static str = "float";
}

impl Scalar for f64 {
    const NAME: &'static str = "double";
}

impl Scalar for u8 {
    const NAME: &'static str = "unsigned char";
}

impl Scalar for i16 {
    const NAME: &'static str = "short";
}

/// Identity of a concrete value type, compared by `TypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    pub fn of<N: Scalar>() -> Self {
        Self {
            id: TypeId::of::<N>(),
            name: N::NAME,
        }
    }

    /// Any `'static` type, named by its Rust path.
    pub fn opaque<V: 'static>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: std::any::type_name::<V>(),
        }
    }

    /// For capabilities that carry no value, like reconnect notifications.
    pub fn untyped() -> Self {
        Self {
            id: TypeId::of::<()>(),
            name: "void",
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Resolution-time identity of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilitySignature {
    pub name: &'static str,
    pub value_type: ValueType,
    pub dimensionality: usize,
}

impl Display for CapabilitySignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<{}, {}>",
            self.name, self.value_type, self.dimensionality
        )
    }
}

/// A named, strongly typed provider/acceptor contract.
///
/// Implementors are zero-sized markers parameterized on value type and
/// dimensionality; `Handle` is what the provider hands to the acceptor.
pub trait Capability: 'static {
    const NAME: &'static str;

    type Handle: Clone + Send + Sync + 'static;

    fn value_type() -> ValueType;

    fn dimensionality() -> usize;

    fn signature() -> CapabilitySignature {
        CapabilitySignature {
            name: Self::NAME,
            value_type: Self::value_type(),
            dimensionality: Self::dimensionality(),
        }
    }
}

/// Lazy accessor: pulling asks the provider to produce its current value,
/// running whatever upstream work that takes.
#[async_trait]
pub trait Pull<V: Send + 'static>: Send + Sync {
    async fn pull(&self) -> Result<V, ExecutionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_types_compare_by_type_identity() {
        assert_eq!(ValueType::of::<f32>(), ValueType::of::<f32>());
        assert_ne!(ValueType::of::<f32>(), ValueType::of::<f64>());
        assert_ne!(ValueType::untyped(), ValueType::of::<u8>());
        assert_eq!(ValueType::of::<i16>().name(), "short");
    }

    #[test]
    fn signature_display_names_all_three_parts() {
        let signature = CapabilitySignature {
            name: "ImageInterface",
            value_type: ValueType::of::<f64>(),
            dimensionality: 3,
        };
        assert_eq!(signature.to_string(), "ImageInterface<double, 3>");
    }
}
