// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::sync::{Arc, Mutex, Weak};

use async_trait::async_trait;

use crate::backends::local::capabilities::{
    MultiStageTransformCapability, ReconnectTransformCapability, TransformCapability,
};
use crate::backends::local::components::{lock, log_hookup, Connections};
use crate::backends::local::data::Transform;
use crate::blueprint::ParameterMap;
use crate::catalog::CriterionStatus;
use crate::config::consts::EXECUTION_ORDER;
use crate::engine::ExecutionController;
use crate::errors::ExecutionError;
use crate::observability::Logger;
use crate::traits::{
    Capability, CapabilitySignature, Component, ComponentKind, Port, Pull, Reconnect, Scalar,
    Stage, ValueType,
};

/// Runs registration stages in its `ExecutionOrder` and provides the
/// composed transform.
///
/// Any number of stages may connect, including none (the identity
/// transform). The run happens on the first pull; its outcome, success or
/// failure, is what every later pull sees.
///
/// Reconnect providers sit downstream of the composite and hold its
/// transform, so the composite only keeps weak handles to them.
pub struct CompositeTransformComponent<N, const D: usize> {
    name: String,
    logger: Logger,
    run: Arc<CompositeRun<N, D>>,
}

struct CompositeRun<N, const D: usize> {
    owner: String,
    logger: Logger,
    execution_order: Vec<String>,
    stages: Mutex<Connections<Arc<dyn Stage<Transform<N, D>>>>>,
    reconnects: Mutex<Connections<Weak<dyn Reconnect>>>,
    outcome: tokio::sync::Mutex<Option<Result<Transform<N, D>, ExecutionError>>>,
}

#[async_trait]
impl<N: Scalar, const D: usize> Pull<Transform<N, D>> for CompositeRun<N, D> {
    async fn pull(&self) -> Result<Transform<N, D>, ExecutionError> {
        let mut outcome = self.outcome.lock().await;
        if let Some(previous) = outcome.as_ref() {
            return previous.clone();
        }

        let stages = lock(&self.stages).all().to_vec();
        let reconnects: Vec<Arc<dyn Reconnect>> = lock(&self.reconnects)
            .all()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();

        let mut controller = ExecutionController::new(self.owner.clone(), self.execution_order.clone())
            .with_logger(self.logger.clone());
        for stage in stages {
            controller.add_stage(stage);
        }
        for reconnect in reconnects {
            controller.add_reconnect(reconnect);
        }

        let result = controller.start().await.map(|composite| composite.clone());
        *outcome = Some(result.clone());
        result
    }
}

impl<N: Scalar, const D: usize> Component for CompositeTransformComponent<N, D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self, signature: &CapabilitySignature) -> Option<Port> {
        if *signature != TransformCapability::<N, D>::signature() {
            return None;
        }
        let run: Arc<dyn Pull<Transform<N, D>>> = self.run.clone();
        Some(Port::new::<TransformCapability<N, D>>(run))
    }

    fn accept(&mut self, port: Port) -> bool {
        let accepted = if let Some(stage) = port.handle::<MultiStageTransformCapability<N, D>>() {
            lock(&self.run.stages).push(stage);
            true
        } else if let Some(reconnect) = port.handle::<ReconnectTransformCapability>() {
            lock(&self.run.reconnects).push(Arc::downgrade(&reconnect));
            true
        } else {
            false
        };
        log_hookup(&self.logger, &self.name, &port, accepted)
    }

    /// Stages are checked against the execution order when the run starts.
    fn connections_satisfied(&self) -> bool {
        true
    }
}

impl<N: Scalar, const D: usize> ComponentKind for CompositeTransformComponent<N, D> {
    const CLASS_NAME: &'static str = "CompositeTransformComponent";

    fn value_type() -> ValueType {
        ValueType::of::<N>()
    }

    fn dimensionality() -> usize {
        D
    }

    fn provided() -> Vec<CapabilitySignature> {
        vec![TransformCapability::<N, D>::signature()]
    }

    fn accepted() -> Vec<CapabilitySignature> {
        vec![
            MultiStageTransformCapability::<N, D>::signature(),
            ReconnectTransformCapability::signature(),
        ]
    }

    fn meets_criterion(key: &str, values: &[String]) -> CriterionStatus {
        if key != EXECUTION_ORDER {
            return CriterionStatus::Failed;
        }
        let mut seen = HashSet::new();
        if !values.is_empty() && values.iter().all(|name| seen.insert(name.as_str())) {
            CriterionStatus::Satisfied
        } else {
            CriterionStatus::Failed
        }
    }

    fn construct(name: &str, parameters: &ParameterMap, logger: Logger) -> Result<Self, String> {
        let execution_order = parameters
            .get(EXECUTION_ORDER)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        Ok(Self {
            name: name.to_string(),
            logger: logger.clone(),
            run: Arc::new(CompositeRun {
                owner: name.to_string(),
                logger,
                execution_order,
                stages: Mutex::new(Connections::new()),
                reconnects: Mutex::new(Connections::new()),
                outcome: tokio::sync::Mutex::new(None),
            }),
        })
    }
}
