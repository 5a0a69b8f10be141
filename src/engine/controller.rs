// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential driver for multi-stage components.
//!
//! An [`ExecutionController`] owns the composite state of one run. Stages
//! run strictly one after another in the declared execution order; each sees
//! the state as folded so far and returns only its own increment. The
//! controller is single use:
//!
//! ```text
//! Idle ──start──▶ Running ──all stages ok──▶ Done
//!   │                │
//!   │ order mismatch └──stage error──▶ Failed
//!   └──────────────────────────────▶ Failed
//! ```

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::errors::ExecutionError;
use crate::observability::messages::controller::{
    ControllerFinished, ControllerStarted, OrderMismatchDetected, StageCompleted, StageFailed,
};
use crate::observability::messages::StructuredLog;
use crate::observability::Logger;
use crate::traits::{CompositeState, Reconnect, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Running,
    Done,
    Failed,
}

impl Display for ControllerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Idle => "idle",
            ControllerState::Running => "running",
            ControllerState::Done => "done",
            ControllerState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

pub struct ExecutionController<S: CompositeState> {
    owner: String,
    execution_order: Vec<String>,
    stages: Vec<Arc<dyn Stage<S>>>,
    reconnects: Vec<Arc<dyn Reconnect>>,
    composite: S,
    state: ControllerState,
    logger: Logger,
}

impl<S: CompositeState> ExecutionController<S> {
    pub fn new(owner: impl Into<String>, execution_order: Vec<String>) -> Self {
        Self {
            owner: owner.into(),
            execution_order,
            stages: Vec::new(),
            reconnects: Vec::new(),
            composite: S::default(),
            state: ControllerState::Idle,
            logger: Logger::root(),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn add_stage(&mut self, stage: Arc<dyn Stage<S>>) {
        self.stages.push(stage);
    }

    pub fn add_reconnect(&mut self, reconnect: Arc<dyn Reconnect>) {
        self.reconnects.push(reconnect);
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn composite(&self) -> &S {
        &self.composite
    }

    pub fn into_composite(self) -> S {
        self.composite
    }

    /// Compare the declared order with the connected stage names as sets.
    /// Both lists of the error are sorted.
    pub fn check_order(&self) -> Result<(), ExecutionError> {
        let declared: BTreeSet<&str> = self.execution_order.iter().map(String::as_str).collect();
        let connected: BTreeSet<&str> = self.stages.iter().map(|s| s.stage_name()).collect();

        let missing: Vec<String> = declared.difference(&connected).map(|s| s.to_string()).collect();
        let unexpected: Vec<String> = connected.difference(&declared).map(|s| s.to_string()).collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(ExecutionError::OrderMismatch {
                owner: self.owner.clone(),
                missing,
                unexpected,
            })
        }
    }

    /// Run every stage in order, then notify the reconnect providers.
    ///
    /// Fails fast: the first stage error stops the run and no later stage
    /// runs. A controller runs at most once.
    pub async fn start(&mut self) -> Result<&S, ExecutionError> {
        if self.state != ControllerState::Idle {
            return Err(ExecutionError::AlreadyStarted {
                owner: self.owner.clone(),
                state: self.state,
            });
        }

        if let Err(err) = self.check_order() {
            self.state = ControllerState::Failed;
            if let ExecutionError::OrderMismatch { missing, unexpected, .. } = &err {
                self.logger.in_scope(|| {
                    OrderMismatchDetected {
                        owner: &self.owner,
                        missing,
                        unexpected,
                    }
                    .log()
                });
            }
            return Err(err);
        }

        self.state = ControllerState::Running;
        let started = ControllerStarted {
            owner: &self.owner,
            stages: self.execution_order.len(),
        };
        let span = started.span("controller_run");
        self.logger.in_scope(|| started.log());
        let run_start = Instant::now();

        for (position, name) in self.execution_order.iter().enumerate() {
            let Some(stage) = self.stages.iter().find(|s| s.stage_name() == name) else {
                continue;
            };
            let stage_start = Instant::now();

            let outcome = stage
                .run_stage(&self.composite)
                .instrument(span.clone())
                .await;
            match outcome {
                Ok(increment) => {
                    self.composite.fold(increment);
                    self.logger.in_scope(|| {
                        StageCompleted {
                            owner: &self.owner,
                            stage: name,
                            position,
                            duration: stage_start.elapsed(),
                        }
                        .log()
                    });
                }
                Err(err) => {
                    self.state = ControllerState::Failed;
                    let err = match err {
                        ExecutionError::ExecutionFailure { .. } => err,
                        other => ExecutionError::ExecutionFailure {
                            stage: name.clone(),
                            message: other.to_string(),
                        },
                    };
                    self.logger.in_scope(|| {
                        StageFailed {
                            owner: &self.owner,
                            stage: name,
                            error: &err,
                        }
                        .log()
                    });
                    return Err(err);
                }
            }
        }

        for reconnect in &self.reconnects {
            reconnect.reconnect();
        }

        self.state = ControllerState::Done;
        self.logger.in_scope(|| {
            ControllerFinished {
                owner: &self.owner,
                stages: self.execution_order.len(),
                reconnects: self.reconnects.len(),
                duration: run_start.elapsed(),
            }
            .log()
        });
        Ok(&self.composite)
    }
}
