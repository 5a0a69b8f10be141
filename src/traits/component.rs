// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::blueprint::ParameterMap;
use crate::catalog::CriterionStatus;
use crate::errors::ExecutionError;
use crate::observability::Logger;
use crate::traits::capability::{CapabilitySignature, ValueType};
use crate::traits::port::Port;

/// A live component instance inside a built network.
///
/// Object safe so the network can own heterogeneous instances. Hookup goes
/// through [`Component::provide`] on the provider and [`Component::accept`]
/// on the acceptor, each keyed by a capability signature the resolver has
/// already proven both sides agree on.
#[async_trait]
pub trait Component: Send + Sync {
    fn name(&self) -> &str;

    /// Hand out the handle for a provided capability.
    fn provide(&self, signature: &CapabilitySignature) -> Option<Port>;

    /// Take a provider's handle. Returns `false` when the port is not for an
    /// accepted capability or the acceptor cannot take another one.
    fn accept(&mut self, port: Port) -> bool;

    fn connections_satisfied(&self) -> bool;

    /// External input slot, for sources the caller feeds directly.
    fn input(&self) -> Option<Port> {
        None
    }

    /// External output slot, for sinks the caller reads from.
    fn output(&self) -> Option<Port> {
        None
    }

    fn is_sink(&self) -> bool {
        false
    }

    /// Run this component's part of the pipeline. Sinks pull from upstream.
    async fn update(&self) -> Result<(), ExecutionError> {
        Ok(())
    }
}

/// The static side of a component: what the catalog knows before any
/// instance exists.
pub trait ComponentKind: Component + Sized + 'static {
    const CLASS_NAME: &'static str;

    fn value_type() -> ValueType;

    fn dimensionality() -> usize;

    fn provided() -> Vec<CapabilitySignature>;

    fn accepted() -> Vec<CapabilitySignature>;

    /// Component-specific criteria, consulted for keys the template
    /// properties do not decide. Anything not recognized here fails.
    fn meets_criterion(_key: &str, _values: &[String]) -> CriterionStatus {
        CriterionStatus::Failed
    }

    fn construct(name: &str, parameters: &ParameterMap, logger: Logger) -> Result<Self, String>;
}
