// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use crate::traits::capability::{Capability, CapabilitySignature, ValueType};

/// A capability handle in transit from provider to acceptor.
///
/// The handle is erased so ports of every capability can travel through the
/// same `Component::accept`; the signature travels with it and
/// [`Port::handle`] only yields the typed handle when the signature matches.
#[derive(Clone)]
pub struct Port {
    signature: CapabilitySignature,
    handle: Arc<dyn Any + Send + Sync>,
}

impl Port {
    pub fn new<C: Capability>(handle: C::Handle) -> Self {
        Self {
            signature: C::signature(),
            handle: Arc::new(handle),
        }
    }

    pub fn signature(&self) -> &CapabilitySignature {
        &self.signature
    }

    pub fn carries<C: Capability>(&self) -> bool {
        self.signature == C::signature()
    }

    pub fn handle<C: Capability>(&self) -> Option<C::Handle> {
        if !self.carries::<C>() {
            return None;
        }
        self.handle.downcast_ref::<C::Handle>().cloned()
    }
}

impl Debug for Port {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Port")
            .field("signature", &self.signature)
            .finish()
    }
}

/// Shared cell a source reads from or a sink writes into.
#[derive(Debug)]
pub struct Slot<V> {
    value: RwLock<Option<V>>,
}

impl<V: Clone> Slot<V> {
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    pub fn set(&self, value: V) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    pub fn get(&self) -> Option<V> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<V: Clone> Default for Slot<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The caller-facing boundary of a source or sink: a slot holding `V`.
pub struct Feed<V>(PhantomData<V>);

impl<V: Clone + Send + Sync + 'static> Capability for Feed<V> {
    const NAME: &'static str = "Feed";

    type Handle = Arc<Slot<V>>;

    fn value_type() -> ValueType {
        ValueType::opaque::<V>()
    }

    fn dimensionality() -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_yields_handle_only_for_its_own_capability() {
        let slot = Arc::new(Slot::<u32>::new());
        slot.set(7);
        let port = Port::new::<Feed<u32>>(slot);

        assert!(port.carries::<Feed<u32>>());
        assert!(port.handle::<Feed<u64>>().is_none());

        let handle = port.handle::<Feed<u32>>().unwrap();
        assert_eq!(handle.get(), Some(7));
    }

    #[test]
    fn slot_clear_forgets_value() {
        let slot = Slot::new();
        slot.set("value".to_string());
        slot.clear();
        assert_eq!(slot.get(), None);
    }
}
