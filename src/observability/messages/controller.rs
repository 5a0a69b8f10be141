// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for multi-stage execution.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A controller began running its stages.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ControllerStarted<'a> {
    pub owner: &'a str,
    pub stages: usize,
}

impl Display for ControllerStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Running {} stages of '{}'", self.stages, self.owner)
    }
}

impl StructuredLog for ControllerStarted<'_> {
    fn log(&self) {
        tracing::info!(owner = self.owner, stages = self.stages, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "controller",
            span_name = name,
            owner = self.owner,
            stages = self.stages,
        )
    }
}

/// One stage finished and its increment was folded in.
///
/// # Log Level
/// `debug!` - Detailed execution trace
pub struct StageCompleted<'a> {
    pub owner: &'a str,
    pub stage: &'a str,
    pub position: usize,
    pub duration: Duration,
}

impl Display for StageCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage {} '{}' of '{}' completed in {:?}",
            self.position, self.stage, self.owner, self.duration
        )
    }
}

impl StructuredLog for StageCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            owner = self.owner,
            stage = self.stage,
            position = self.position,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stage",
            span_name = name,
            owner = self.owner,
            stage = self.stage,
            position = self.position,
        )
    }
}

/// A stage failed; the remaining stages are skipped.
///
/// # Log Level
/// `warn!` - The failure is returned to whoever pulled
pub struct StageFailed<'a> {
    pub owner: &'a str,
    pub stage: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for StageFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' of '{}' failed: {}",
            self.stage, self.owner, self.error
        )
    }
}

impl StructuredLog for StageFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            owner = self.owner,
            stage = self.stage,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "stage",
            span_name = name,
            owner = self.owner,
            stage = self.stage,
        )
    }
}

/// The declared execution order and the connected stages disagree.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct OrderMismatchDetected<'a> {
    pub owner: &'a str,
    pub missing: &'a [String],
    pub unexpected: &'a [String],
}

impl Display for OrderMismatchDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Execution order of '{}' does not match its stages: missing [{}], unexpected [{}]",
            self.owner,
            self.missing.join(", "),
            self.unexpected.join(", ")
        )
    }
}

impl StructuredLog for OrderMismatchDetected<'_> {
    fn log(&self) {
        tracing::error!(
            owner = self.owner,
            missing = self.missing.join(", "),
            unexpected = self.unexpected.join(", "),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "controller",
            span_name = name,
            owner = self.owner,
        )
    }
}

/// Every stage ran and every reconnect provider was notified.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ControllerFinished<'a> {
    pub owner: &'a str,
    pub stages: usize,
    pub reconnects: usize,
    pub duration: Duration,
}

impl Display for ControllerFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' finished {} stages in {:?}, notified {} reconnect provider(s)",
            self.owner, self.stages, self.duration, self.reconnects
        )
    }
}

impl StructuredLog for ControllerFinished<'_> {
    fn log(&self) {
        tracing::info!(
            owner = self.owner,
            stages = self.stages,
            reconnects = self.reconnects,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "controller",
            span_name = name,
            owner = self.owner,
            stages = self.stages,
        )
    }
}
