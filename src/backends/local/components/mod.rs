// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod composite_transform;
pub mod image_sink;
pub mod image_source;
pub mod registration_stage;
pub mod resampler;

pub use composite_transform::CompositeTransformComponent;
pub use image_sink::ImageSinkComponent;
pub use image_source::ImageSourceComponent;
pub use registration_stage::RegistrationStageComponent;
pub use resampler::ResamplerComponent;

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::observability::messages::component::{PortAccepted, PortRefused};
use crate::observability::messages::StructuredLog;
use crate::observability::Logger;
use crate::traits::Port;

/// Handles received for one accepted capability.
pub(crate) struct Connections<H> {
    handles: Vec<H>,
}

impl<H> Connections<H> {
    pub(crate) fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, handle: H) {
        self.handles.push(handle);
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    /// The handle, when exactly one provider is connected.
    pub(crate) fn single(&self) -> Option<&H> {
        match self.handles.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub(crate) fn is_single(&self) -> bool {
        self.single().is_some()
    }

    pub(crate) fn all(&self) -> &[H] {
        &self.handles
    }
}

/// Hookup state is written during build and read while running, never
/// across an await.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn log_hookup(logger: &Logger, component: &str, port: &Port, accepted: bool) -> bool {
    let capability = port.signature().to_string();
    logger.in_scope(|| {
        if accepted {
            PortAccepted {
                component,
                capability: &capability,
            }
            .log();
        } else {
            PortRefused {
                component,
                capability: &capability,
            }
            .log();
        }
    });
    accepted
}
