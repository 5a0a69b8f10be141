// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::ExecutionError;

/// State accumulated across the stages of a multi-stage component.
pub trait CompositeState: Clone + Default + Send + Sync + 'static {
    type Increment: Send + 'static;

    fn fold(&mut self, increment: Self::Increment);
}

/// One step of a multi-stage component. Receives the composite state as it
/// stands after the previous stage and returns only its own contribution.
#[async_trait]
pub trait Stage<S: CompositeState>: Send + Sync {
    fn stage_name(&self) -> &str;

    async fn run_stage(&self, initial: &S) -> Result<S::Increment, ExecutionError>;
}

/// Notified once every stage has run, so consumers of the composite result
/// can drop anything computed from a stale one.
pub trait Reconnect: Send + Sync {
    fn reconnect(&self);
}
