// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for controller and network tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backends::local::components::{lock, log_hookup, Connections};
use crate::backends::local::data::{Transform, TransformStep};
use crate::blueprint::ParameterMap;
use crate::catalog::CriterionStatus;
use crate::errors::ExecutionError;
use crate::observability::Logger;
use crate::traits::{
    Capability, CapabilitySignature, Component, ComponentKind, Feed, Port, Pull, Reconnect, Slot,
    Stage, ValueType,
};

pub type StubState = Transform<f64, 2>;

/// Returns a fixed step and records every initial state it was given.
pub struct RecordingStage {
    name: String,
    step: TransformStep<f64>,
    observed: Mutex<Vec<StubState>>,
}

impl RecordingStage {
    pub fn new(name: &str, step: TransformStep<f64>) -> Self {
        Self {
            name: name.to_string(),
            step,
            observed: Mutex::new(Vec::new()),
        }
    }

    pub fn observed(&self) -> Vec<StubState> {
        lock(&self.observed).clone()
    }
}

#[async_trait]
impl Stage<StubState> for RecordingStage {
    fn stage_name(&self) -> &str {
        &self.name
    }

    async fn run_stage(&self, initial: &StubState) -> Result<TransformStep<f64>, ExecutionError> {
        lock(&self.observed).push(initial.clone());
        Ok(self.step.clone())
    }
}

/// Always fails with the error it was built with.
pub struct FailingStage {
    name: String,
    error: ExecutionError,
}

impl FailingStage {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            error: ExecutionError::ExecutionFailure {
                stage: name.to_string(),
                message: message.to_string(),
            },
        }
    }

    pub fn missing_input(name: &str, component: &str) -> Self {
        Self {
            name: name.to_string(),
            error: ExecutionError::MissingInput {
                component: component.to_string(),
            },
        }
    }
}

#[async_trait]
impl Stage<StubState> for FailingStage {
    fn stage_name(&self) -> &str {
        &self.name
    }

    async fn run_stage(&self, _initial: &StubState) -> Result<TransformStep<f64>, ExecutionError> {
        Err(self.error.clone())
    }
}

#[derive(Default)]
pub struct CountingReconnect {
    count: AtomicUsize,
}

impl CountingReconnect {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Reconnect for CountingReconnect {
    fn reconnect(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// A capability only the producer/consumer doubles share.
pub struct AnswerCapability;

impl Capability for AnswerCapability {
    const NAME: &'static str = "AnswerInterface";

    type Handle = Arc<dyn Pull<i16>>;

    fn value_type() -> ValueType {
        ValueType::of::<i16>()
    }

    fn dimensionality() -> usize {
        0
    }
}

/// Provides the `Answer` parameter it was constructed with.
pub struct ProducerComponent {
    name: String,
    answer: Arc<FixedAnswer>,
}

struct FixedAnswer(i16);

#[async_trait]
impl Pull<i16> for FixedAnswer {
    async fn pull(&self) -> Result<i16, ExecutionError> {
        Ok(self.0)
    }
}

impl Component for ProducerComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self, signature: &CapabilitySignature) -> Option<Port> {
        if *signature != AnswerCapability::signature() {
            return None;
        }
        let answer: Arc<dyn Pull<i16>> = self.answer.clone();
        Some(Port::new::<AnswerCapability>(answer))
    }

    fn accept(&mut self, _port: Port) -> bool {
        false
    }

    fn connections_satisfied(&self) -> bool {
        true
    }
}

impl ComponentKind for ProducerComponent {
    const CLASS_NAME: &'static str = "Producer";

    fn value_type() -> ValueType {
        ValueType::of::<i16>()
    }

    fn dimensionality() -> usize {
        0
    }

    fn provided() -> Vec<CapabilitySignature> {
        vec![AnswerCapability::signature()]
    }

    fn accepted() -> Vec<CapabilitySignature> {
        Vec::new()
    }

    fn meets_criterion(key: &str, values: &[String]) -> CriterionStatus {
        match (key, values) {
            ("Answer", [value]) if value.parse::<i16>().is_ok() => CriterionStatus::Satisfied,
            _ => CriterionStatus::Failed,
        }
    }

    fn construct(name: &str, parameters: &ParameterMap, _logger: Logger) -> Result<Self, String> {
        let answer = parameters
            .first("Answer")
            .unwrap_or("0")
            .parse::<i16>()
            .map_err(|e| e.to_string())?;
        Ok(Self {
            name: name.to_string(),
            answer: Arc::new(FixedAnswer(answer)),
        })
    }
}

/// Terminal double that stores whatever its producer yields.
pub struct ConsumerComponent {
    name: String,
    logger: Logger,
    upstream: Connections<Arc<dyn Pull<i16>>>,
    slot: Arc<Slot<i16>>,
}

#[async_trait]
impl Component for ConsumerComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self, _signature: &CapabilitySignature) -> Option<Port> {
        None
    }

    fn accept(&mut self, port: Port) -> bool {
        let handle = port.handle::<AnswerCapability>();
        let accepted = handle.is_some();
        if let Some(handle) = handle {
            self.upstream.push(handle);
        }
        log_hookup(&self.logger, &self.name, &port, accepted)
    }

    fn connections_satisfied(&self) -> bool {
        self.upstream.is_single()
    }

    fn output(&self) -> Option<Port> {
        Some(Port::new::<Feed<i16>>(self.slot.clone()))
    }

    fn is_sink(&self) -> bool {
        true
    }

    async fn update(&self) -> Result<(), ExecutionError> {
        for upstream in self.upstream.all() {
            self.slot.set(upstream.pull().await?);
        }
        Ok(())
    }
}

impl ComponentKind for ConsumerComponent {
    const CLASS_NAME: &'static str = "Consumer";

    fn value_type() -> ValueType {
        ValueType::of::<i16>()
    }

    fn dimensionality() -> usize {
        0
    }

    fn provided() -> Vec<CapabilitySignature> {
        Vec::new()
    }

    fn accepted() -> Vec<CapabilitySignature> {
        vec![AnswerCapability::signature()]
    }

    fn construct(name: &str, _parameters: &ParameterMap, logger: Logger) -> Result<Self, String> {
        Ok(Self {
            name: name.to_string(),
            logger,
            upstream: Connections::new(),
            slot: Arc::new(Slot::new()),
        })
    }
}
